//! Integration tests for the editing session
//!
//! This tests:
//! - Drag & drop flows from the component and layout libraries
//! - Reordering existing content
//! - Column widths staying in step with columns
//! - Observers, saving and exporting

use mailframe_editor::library::{default_components, default_layouts};
use mailframe_editor::merge_tags::used_tags;
use mailframe_editor::{
    ComponentDefinition, Document, DragSource, DropTarget, EditSession, EditorObserver,
    EditorOptions, ExportResult, LayoutDefinition, Mutation, Selection,
};
use mailframe_model::{deserialize, ColumnPath, ContentPath, ContentType, Design};
use std::cell::RefCell;
use std::rc::Rc;

fn session() -> EditSession {
    EditSession::new("test", Document::default())
}

fn drag_component(session: &mut EditSession, content_type: ContentType, target: DropTarget) -> bool {
    session.begin_drag(DragSource::Component(ComponentDefinition::new(content_type, "x")));
    session.drop(target)
}

fn assert_cells_match_columns(design: &Design) {
    for (index, row) in design.rows().iter().enumerate() {
        assert_eq!(
            row.cells.len(),
            row.columns.len(),
            "row {} has {} widths for {} columns",
            index,
            row.cells.len(),
            row.columns.len()
        );
    }
}

#[test]
fn test_build_newsletter_by_drag_and_drop() -> anyhow::Result<()> {
    let mut session = session();

    assert!(drag_component(&mut session, ContentType::Heading, DropTarget::Row(0)));
    assert!(drag_component(&mut session, ContentType::Text, DropTarget::Row(0)));

    session.begin_drag(DragSource::Layout(LayoutDefinition::equal(2)));
    assert!(session.drop(DropTarget::RowBoundary(1)));

    assert!(drag_component(
        &mut session,
        ContentType::Image,
        DropTarget::Column(ColumnPath::top(1, 0))
    ));
    assert!(drag_component(
        &mut session,
        ContentType::Button,
        DropTarget::Column(ColumnPath::top(1, 1))
    ));

    let design = session.design();
    assert_eq!(design.rows().len(), 2);
    assert_eq!(design.rows()[1].cells, vec![50, 50]);
    assert_eq!(design.counters.get("u_content_heading"), Some(&1));
    assert_eq!(design.counters.get("u_content_image"), Some(&1));

    let result = session.export();
    assert!(result.success);
    assert!(result.html.contains("Your Heading"));
    assert!(result.html.contains("Click Here"));

    let reloaded = deserialize(&result.design_json)?;
    assert_eq!(&reloaded, session.design());
    Ok(())
}

#[test]
fn test_component_drop_at_row_boundary_creates_row() {
    let mut session = session();

    assert!(drag_component(&mut session, ContentType::Divider, DropTarget::RowBoundary(0)));

    let design = session.design();
    assert_eq!(design.rows().len(), 2);
    assert_eq!(design.rows()[0].columns[0].contents[0].type_name(), "divider");
    assert!(session.undo());
    assert_eq!(session.design().rows().len(), 1);
}

#[test]
fn test_same_column_reorder_moves_first_to_last() {
    let mut session = session();
    for content_type in [ContentType::Heading, ContentType::Text, ContentType::Button] {
        drag_component(&mut session, content_type, DropTarget::Row(0));
    }

    session.begin_drag(DragSource::Content(ContentPath::top(0, 0, 0)));
    assert!(session.drop(DropTarget::Content {
        column: ColumnPath::top(0, 0),
        index: 3,
    }));

    let types: Vec<&str> = session.design().rows()[0].columns[0]
        .contents
        .iter()
        .map(|c| c.type_name())
        .collect();
    assert_eq!(types, vec!["text", "button", "heading"]);
    assert_eq!(session.selection(), &Selection::Content(ContentPath::top(0, 0, 2)));
}

#[test]
fn test_move_content_across_rows() {
    let mut session = session();
    drag_component(&mut session, ContentType::Text, DropTarget::Row(0));
    session.begin_drag(DragSource::Layout(LayoutDefinition::equal(3)));
    session.drop(DropTarget::Row(0));

    session.begin_drag(DragSource::Content(ContentPath::top(0, 0, 0)));
    assert!(session.drop(DropTarget::Column(ColumnPath::top(1, 2))));

    let design = session.design();
    assert!(design.rows()[0].columns[0].contents.is_empty());
    assert_eq!(design.rows()[1].columns[2].contents.len(), 1);
}

#[test]
fn test_layout_on_column_replaces_it() {
    let mut session = session();
    drag_component(&mut session, ContentType::Text, DropTarget::Row(0));
    session.apply(Mutation::AddColumn { row: 0 });

    session.begin_drag(DragSource::Layout(LayoutDefinition::with_widths(vec![33, 67])));
    assert!(session.drop(DropTarget::Column(ColumnPath::top(0, 0))));

    let row = &session.design().rows()[0];
    assert_eq!(row.columns.len(), 3);
    assert_eq!(row.cells, vec![33, 67, 50]);
    assert_eq!(row.columns[0].contents.len(), 1);
    assert!(row.columns[1].contents.is_empty());
}

#[test]
fn test_layout_between_contents_nests() {
    let mut session = session();
    drag_component(&mut session, ContentType::Text, DropTarget::Row(0));
    drag_component(&mut session, ContentType::Text, DropTarget::Row(0));

    session.begin_drag(DragSource::Layout(LayoutDefinition::equal(2)));
    assert!(session.drop(DropTarget::Content {
        column: ColumnPath::top(0, 0),
        index: 1,
    }));

    let contents = &session.design().rows()[0].columns[0].contents;
    assert_eq!(contents.len(), 3);
    assert!(contents[1].is_layout());

    // Content can now be dropped two levels deep
    let nested = ColumnPath::top(0, 0).child(1, 1);
    assert!(drag_component(&mut session, ContentType::Button, DropTarget::Column(nested.clone())));
    assert!(session.design().content(&nested.content(0)).is_some());
}

#[test]
fn test_cells_stay_in_step_through_column_edits() {
    let mut session = session();
    let edits = vec![
        Mutation::AddColumn { row: 0 },
        Mutation::AddColumn { row: 0 },
        Mutation::SplitColumn { row: 0, column: 1 },
        Mutation::RemoveColumn { row: 0 },
        Mutation::SetColumnCount { row: 0, count: 4 },
        Mutation::ReplaceColumnWithLayout {
            row: 0,
            column: 2,
            layout: LayoutDefinition::equal(3),
        },
        Mutation::DuplicateRow { index: 0 },
        Mutation::SetColumnCount { row: 1, count: 1 },
    ];

    for edit in edits {
        assert!(session.apply(edit));
        assert_cells_match_columns(session.design());
    }

    assert_eq!(session.design().rows()[0].columns.len(), 6);
    assert_eq!(session.design().rows()[1].cells, vec![100]);
}

#[test]
fn test_split_keeps_total_width() {
    let mut session = session();
    session.apply(Mutation::SetColumnCount { row: 0, count: 3 });

    session.apply(Mutation::SplitColumn { row: 0, column: 0 });

    assert_eq!(session.design().rows()[0].cells, vec![16, 17, 33, 33]);
}

#[test]
fn test_library_defaults_are_droppable() {
    let mut session = session();

    for component in default_components() {
        session.begin_drag(DragSource::Component(component));
        assert!(session.drop(DropTarget::Row(0)));
    }
    for layout in default_layouts() {
        session.begin_drag(DragSource::Layout(layout));
        assert!(session.drop(DropTarget::RowBoundary(1)));
    }

    assert_eq!(session.design().rows().len(), 1 + default_layouts().len());
    assert_cells_match_columns(session.design());
}

#[test]
fn test_merge_tags_in_placed_content() {
    let mut session = session();
    session.apply(Mutation::InsertContent {
        column: ColumnPath::top(0, 0),
        index: None,
        content: mailframe_model::Content::text("<p>Hi {{first_name}}, from {{company}}</p>"),
    });

    let options = EditorOptions::default();
    let tags = options.available_merge_tags();
    let used: Vec<&str> = used_tags(session.design(), tags)
        .into_iter()
        .map(|tag| tag.key.as_str())
        .collect();

    assert_eq!(used, vec!["first_name", "company"]);
}

#[derive(Default)]
struct Log {
    changes: Vec<usize>,
    exports: Vec<bool>,
}

struct RowCounter(Rc<RefCell<Log>>);

impl EditorObserver for RowCounter {
    fn on_change(&mut self, design: &Design) {
        self.0.borrow_mut().changes.push(design.rows().len());
    }

    fn on_export(&mut self, result: &ExportResult) {
        self.0.borrow_mut().exports.push(result.success);
    }
}

#[test]
fn test_observers_see_each_change() {
    let log = Rc::new(RefCell::new(Log::default()));
    let mut session =
        EditSession::with_observers("test", Document::default(), vec![Box::new(RowCounter(log.clone()))]);

    session.apply(Mutation::DuplicateRow { index: 0 });
    session.apply(Mutation::DuplicateRow { index: 0 });
    session.apply(Mutation::MoveRowUp { index: 0 });
    session.undo();
    session.export();

    let log = log.borrow();
    assert_eq!(log.changes, vec![2, 3, 2]);
    assert_eq!(log.exports, vec![true]);
}
