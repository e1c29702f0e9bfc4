use futures::executor::block_on;
use twoslash::{DisplayPart, Options, PLUGIN_ID, Span, TextEdit};

use crate::tests::ide::fill_dsl::{StubService, URI};
use crate::{
    ApplyMode, ContentChange, EditorModel, IdeError, MemoryDocument, PassConfig, PassOutcome,
    apply_text_edits, apply_with_mode, fill_queries,
};

fn edit(start: usize, end: usize, new_text: &str) -> TextEdit {
    TextEdit {
        range: Span::new(start, end),
        new_text: new_text.to_string(),
    }
}

/// Logs every call the pass makes into the model.
#[derive(Default)]
struct RecordingModel {
    log: Vec<String>,
    fail_execute: bool,
}

impl EditorModel for RecordingModel {
    fn uri(&self) -> &str {
        URI
    }

    fn text(&self) -> String {
        String::new()
    }

    fn eol(&self) -> String {
        "\n".to_string()
    }

    fn version(&self) -> u64 {
        1
    }

    fn apply_edits(&mut self, edits: &[TextEdit]) -> Result<(), IdeError> {
        self.log.push(format!("apply:{}", edits.len()));
        Ok(())
    }

    fn execute_edits(&mut self, source: &str, edits: &[TextEdit]) -> Result<(), IdeError> {
        self.log.push(format!("execute:{source}:{}", edits.len()));
        if self.fail_execute {
            return Err(IdeError::Host("model disposed".to_string()));
        }
        Ok(())
    }

    fn push_stack_element(&mut self) {
        self.log.push("push".to_string());
    }

    fn pop_stack_element(&mut self) {
        self.log.push("pop".to_string());
    }
}

fn pass(doc: &mut MemoryDocument, service: &StubService, mode: ApplyMode) -> PassOutcome {
    service.set_text(doc.text());
    block_on(fill_queries(
        doc,
        service,
        &Options::default(),
        mode,
        &PassConfig::default(),
    ))
    .unwrap_or_else(|e| panic!("pass failed: {e}"))
}

fn number_service() -> StubService {
    StubService::default().with_type("foo", vec![DisplayPart::text("number")])
}

#[test]
fn test_undo_group_brackets_execute() {
    let mut model = RecordingModel::default();
    apply_with_mode(&mut model, &[edit(0, 0, "x")], ApplyMode::UndoGroup).unwrap();
    assert_eq!(
        model.log,
        vec![
            "pop".to_string(),
            format!("execute:{PLUGIN_ID}:1"),
            "push".to_string(),
        ]
    );
}

#[test]
fn test_undo_group_closes_on_failure() {
    let mut model = RecordingModel {
        fail_execute: true,
        ..RecordingModel::default()
    };
    let result = apply_with_mode(&mut model, &[edit(0, 0, "x")], ApplyMode::UndoGroup);
    assert_eq!(result, Err(IdeError::Host("model disposed".to_string())));
    assert_eq!(model.log.last().map(String::as_str), Some("push"));
}

#[test]
fn test_replay_skips_undo_stack() {
    let mut model = RecordingModel::default();
    apply_with_mode(&mut model, &[edit(0, 0, "x"), edit(1, 1, "y")], ApplyMode::Replay).unwrap();
    assert_eq!(model.log, vec!["apply:2".to_string()]);
}

#[test]
fn test_pass_joins_user_undo_element() {
    let service = number_service();
    let mut doc = MemoryDocument::new(URI, "let foo = 1;\n// ^");

    let change = doc.edit(&[edit(17, 17, "?")]).unwrap();
    assert_eq!(
        change,
        ContentChange {
            version_id: 2,
            is_undoing: false,
            is_redoing: false,
        }
    );
    assert_eq!(doc.undo_depth(), 1);

    assert_eq!(
        pass(&mut doc, &service, ApplyMode::UndoGroup),
        PassOutcome::Applied {
            edits: 1,
            version: 3,
        }
    );
    assert_eq!(doc.text(), "let foo = 1;\n// ^? number");
    assert_eq!(doc.undo_depth(), 1);

    // One undo reverts the keystroke and the generated comment together.
    let undo = doc.undo().unwrap();
    assert!(undo.is_undoing);
    assert_eq!(doc.text(), "let foo = 1;\n// ^");
    assert_eq!(pass(&mut doc, &service, ApplyMode::Replay), PassOutcome::Unchanged);

    let redo = doc.redo().unwrap();
    assert!(redo.is_redoing);
    assert_eq!(doc.text(), "let foo = 1;\n// ^? number");
    assert_eq!(pass(&mut doc, &service, ApplyMode::Replay), PassOutcome::Unchanged);
}

#[test]
fn test_replay_after_undo_keeps_redo() {
    let service = number_service();
    let mut doc = MemoryDocument::new(URI, "let foo = 1;\n// ^?");

    doc.edit(&[edit(10, 11, "2")]).unwrap();
    doc.undo().unwrap();
    assert_eq!((doc.undo_depth(), doc.redo_depth()), (0, 1));

    assert!(matches!(
        pass(&mut doc, &service, ApplyMode::Replay),
        PassOutcome::Applied { edits: 1, .. }
    ));
    assert_eq!(doc.text(), "let foo = 1;\n// ^? number");
    assert_eq!((doc.undo_depth(), doc.redo_depth()), (0, 1));
}

#[test]
fn test_memory_document_changes() {
    let mut doc = MemoryDocument::new(URI, "abc");
    assert_eq!(doc.eol(), "\n");
    doc.edit(&[edit(0, 1, "x")]).unwrap();
    doc.undo().unwrap();
    doc.redo().unwrap();

    let changes = doc.take_changes();
    let flags: Vec<_> = changes
        .iter()
        .map(|c| (c.version_id, c.is_undoing, c.is_redoing))
        .collect();
    assert_eq!(flags, vec![(2, false, false), (3, true, false), (4, false, true)]);
    assert!(doc.take_changes().is_empty());
    assert!(doc.undo().is_some());
    assert!(doc.undo().is_none());
}

#[test]
fn test_memory_document_rejects_bad_edit() {
    let mut doc = MemoryDocument::new(URI, "héllo");
    let result = doc.edit(&[edit(2, 3, "e")]);
    assert_eq!(result, Err(IdeError::InvalidEditRange { start: 2, end: 3 }));
    assert_eq!(doc.text(), "héllo");
    assert_eq!(doc.version(), 1);
    assert_eq!(doc.undo_depth(), 0);
}

#[test]
fn test_apply_text_edits() {
    assert_eq!(
        apply_text_edits("abcdef", &[edit(4, 6, "X"), edit(0, 1, "Y")]).unwrap(),
        "YbcdX"
    );
    assert_eq!(
        apply_text_edits("abcd", &[edit(0, 2, "12"), edit(2, 4, "34")]).unwrap(),
        "1234"
    );
    assert_eq!(apply_text_edits("abc", &[]).unwrap(), "abc");

    assert_eq!(
        apply_text_edits("abcdef", &[edit(0, 5, ""), edit(3, 6, "")]),
        Err(IdeError::OverlappingEdits)
    );
    assert_eq!(
        apply_text_edits("é", &[edit(1, 2, "e")]),
        Err(IdeError::InvalidEditRange { start: 1, end: 2 })
    );
    assert_eq!(
        apply_text_edits("abc", &[edit(2, 9, "")]),
        Err(IdeError::InvalidEditRange { start: 2, end: 9 })
    );
}
