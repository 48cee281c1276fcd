use crate::content::Content;
use crate::design::{Body, Column, Design, Row};
use crate::id_generator::new_id;

/// Visitor pattern for traversing a design immutably
///
/// Default implementations walk the entire tree, including layout columns
/// and legacy sub-columns. Override specific visit_* methods to act on nodes.
pub trait Visitor: Sized {
    fn visit_design(&mut self, design: &Design) {
        walk_design(self, design);
    }

    fn visit_body(&mut self, body: &Body) {
        walk_body(self, body);
    }

    fn visit_row(&mut self, row: &Row) {
        walk_row(self, row);
    }

    fn visit_column(&mut self, column: &Column) {
        walk_column(self, column);
    }

    fn visit_content(&mut self, content: &Content) {
        walk_content(self, content);
    }
}

/// Mutable visitor pattern for transforming a design in place
pub trait VisitorMut: Sized {
    fn visit_design_mut(&mut self, design: &mut Design) {
        walk_design_mut(self, design);
    }

    fn visit_body_mut(&mut self, body: &mut Body) {
        walk_body_mut(self, body);
    }

    fn visit_row_mut(&mut self, row: &mut Row) {
        walk_row_mut(self, row);
    }

    fn visit_column_mut(&mut self, column: &mut Column) {
        walk_column_mut(self, column);
    }

    fn visit_content_mut(&mut self, content: &mut Content) {
        walk_content_mut(self, content);
    }
}

// Default walk implementations for immutable visitor

pub fn walk_design<V: Visitor>(visitor: &mut V, design: &Design) {
    visitor.visit_body(&design.body);
}

pub fn walk_body<V: Visitor>(visitor: &mut V, body: &Body) {
    for row in &body.rows {
        visitor.visit_row(row);
    }
}

pub fn walk_row<V: Visitor>(visitor: &mut V, row: &Row) {
    for column in &row.columns {
        visitor.visit_column(column);
    }
}

pub fn walk_column<V: Visitor>(visitor: &mut V, column: &Column) {
    for content in &column.contents {
        visitor.visit_content(content);
    }
    for sub in &column.sub_columns {
        visitor.visit_column(sub);
    }
}

pub fn walk_content<V: Visitor>(visitor: &mut V, content: &Content) {
    if let Some(columns) = content.columns() {
        for column in columns {
            visitor.visit_column(column);
        }
    }
}

// Default walk implementations for mutable visitor

pub fn walk_design_mut<V: VisitorMut>(visitor: &mut V, design: &mut Design) {
    visitor.visit_body_mut(&mut design.body);
}

pub fn walk_body_mut<V: VisitorMut>(visitor: &mut V, body: &mut Body) {
    for row in &mut body.rows {
        visitor.visit_row_mut(row);
    }
}

pub fn walk_row_mut<V: VisitorMut>(visitor: &mut V, row: &mut Row) {
    for column in &mut row.columns {
        visitor.visit_column_mut(column);
    }
}

pub fn walk_column_mut<V: VisitorMut>(visitor: &mut V, column: &mut Column) {
    for content in &mut column.contents {
        visitor.visit_content_mut(content);
    }
    for sub in &mut column.sub_columns {
        visitor.visit_column_mut(sub);
    }
}

pub fn walk_content_mut<V: VisitorMut>(visitor: &mut V, content: &mut Content) {
    if let Some(columns) = content.columns_mut() {
        for column in columns {
            visitor.visit_column_mut(column);
        }
    }
}

/// Gives every visited node a fresh id
pub struct ReassignIds;

impl VisitorMut for ReassignIds {
    fn visit_body_mut(&mut self, body: &mut Body) {
        body.id = new_id();
        walk_body_mut(self, body);
    }

    fn visit_row_mut(&mut self, row: &mut Row) {
        row.id = new_id();
        walk_row_mut(self, row);
    }

    fn visit_column_mut(&mut self, column: &mut Column) {
        column.id = new_id();
        walk_column_mut(self, column);
    }

    fn visit_content_mut(&mut self, content: &mut Content) {
        content.id = new_id();
        walk_content_mut(self, content);
    }
}

/// Collects every node id in document order
#[derive(Debug, Default)]
pub struct CollectIds {
    pub ids: Vec<String>,
}

impl Visitor for CollectIds {
    fn visit_body(&mut self, body: &Body) {
        self.ids.push(body.id.clone());
        walk_body(self, body);
    }

    fn visit_row(&mut self, row: &Row) {
        self.ids.push(row.id.clone());
        walk_row(self, row);
    }

    fn visit_column(&mut self, column: &Column) {
        self.ids.push(column.id.clone());
        walk_column(self, column);
    }

    fn visit_content(&mut self, content: &Content) {
        self.ids.push(content.id.clone());
        walk_content(self, content);
    }
}
