use std::cell::Cell;

use futures::executor::block_on;
use twoslash::{DisplayPart, MarkerOrder, Options, TextEdit};

use crate::tests::ide::fill_dsl::{StubService, URI, t};
use crate::{
    ApplyMode, EditorModel, IdeError, MemoryDocument, PassConfig, PassOutcome, fill_queries,
};

fn multiline() -> Options {
    Options {
        multiline: true,
        ..Options::default()
    }
}

#[test]
fn fill_caret_query_with_type() {
    t("let foo = 1;\n// ^?")
        .ty("foo", "number")
        .run()
        .expect_text("let foo = 1;\n// ^? number")
        .expect_outcome(PassOutcome::Applied {
            edits: 1,
            version: 2,
        });
}

#[test]
fn fill_inline_arrow_query() {
    t("let foo = 1; //=> ")
        .ty("1", "number")
        .run()
        .expect_text("let foo = 1; //=> number");
}

#[test]
fn fill_own_line_arrow_queries_previous_line() {
    t("const foo = 1\n//=>\n")
        .ty("foo", "1")
        .run()
        .expect_text("const foo = 1\n//=> 1\n");
}

#[test]
fn fill_is_idempotent() {
    t("let foo = 1;\n// ^?\nlet bar = baz; //=>\n")
        .ty("foo", "number")
        .ty("baz", "string")
        .run()
        .expect_edits(2)
        .expect_text("let foo = 1;\n// ^? number\nlet bar = baz; //=> string\n");

    let mut run = t("let foo = { bar: 1 };\n// ^?")
        .ty("foo", "{\n  bar: number;\n}")
        .options(multiline())
        .run();
    run.expect_idempotent();
}

#[test]
fn fill_counts_only_changed_markers() {
    t("let a = 1;\n// ^?\nlet b = 'x';\n// ^?\n")
        .ty("a", "number")
        .ty("b", "string")
        .run()
        .expect_edits(2);

    t("let a = 1;\n// ^? number\nlet b = 'x';\n// ^?\n")
        .ty("a", "number")
        .ty("b", "string")
        .run()
        .expect_edits(1)
        .expect_text("let a = 1;\n// ^? number\nlet b = 'x';\n// ^? string\n");
}

#[test]
fn fill_replaces_stale_info_with_bare_marker() {
    t("let foo = 1;\n// ^? string")
        .run()
        .expect_text("let foo = 1;\n// ^?");
}

#[test]
fn fill_skips_caret_on_first_line_only() {
    t("// ^?\nlet foo = 1;\n// ^?")
        .ty("foo", "number")
        .run()
        .expect_edits(1)
        .expect_text("// ^?\nlet foo = 1;\n// ^? number");
}

#[test]
fn fill_pause_on_error_blocks_every_marker() {
    let paused = Options {
        pause_on_error: true,
        ..Options::default()
    };

    t("let foo = 1;\n// ^?\nlet bar: string = 2;\n")
        .ty("foo", "number")
        .semantic_error("Type 'number' is not assignable to type 'string'.")
        .options(paused)
        .run()
        .expect_outcome(PassOutcome::Paused)
        .expect_text("let foo = 1;\n// ^?\nlet bar: string = 2;\n");

    t("let foo = 1;\n// ^?\nlet = ;\n")
        .ty("foo", "number")
        .syntactic_error("Variable declaration expected.")
        .options(paused)
        .run()
        .expect_outcome(PassOutcome::Paused);

    t("let foo = 1;\n// ^?")
        .ty("foo", "number")
        .options(paused)
        .run()
        .expect_text("let foo = 1;\n// ^? number");
}

#[test]
fn fill_diagnostics_ignored_without_pause_on_error() {
    t("let foo = 1;\n// ^?")
        .ty("foo", "number")
        .semantic_error("unrelated")
        .run()
        .expect_text("let foo = 1;\n// ^? number");
}

#[test]
fn fill_multiline_aligns_under_marker() {
    t("function f() {\n  let foo = { bar: 1 };\n  // ^?\n}\n")
        .ty("foo", "{\n  bar: number;\n}")
        .options(multiline())
        .run()
        .expect_text(
            "function f() {\n  let foo = { bar: 1 };\n  // ^? {\n  //      bar: number;\n  //    }\n}\n",
        );
}

#[test]
fn fill_multiline_info_containing_arrow_is_idempotent() {
    let pad = format!("//{}", " ".repeat(14));
    let mut run = t("let a = 1; //=>\nfoo;")
        .ty("1", "{\n  s: '//=>';\n}")
        .options(multiline())
        .run();
    run.expect_text(&format!(
        "let a = 1; //=> {{\n{pad}  s: '//=>';\n{pad}}}\nfoo;"
    ))
    .expect_edits(1);
    run.expect_idempotent();
}

#[test]
fn fill_caret_column_counts_characters() {
    t("f(变量,y);\n//   ^?")
        .ty("y", "number")
        .ty("变量", "string")
        .run()
        .expect_text("f(变量,y);\n//   ^? number");
}

#[test]
fn fill_switching_layout_replaces_whole_block() {
    let mut run = t("let foo = { bar: 1 };\n// ^?\nfoo;")
        .ty("foo", "{\n  bar: number;\n}")
        .options(multiline())
        .run();
    run.expect_text("let foo = { bar: 1 };\n// ^? {\n//      bar: number;\n//    }\nfoo;");

    run.options = Options::default();
    run.pass(ApplyMode::UndoGroup);
    run.expect_text("let foo = { bar: 1 };\n// ^? { bar: number; }\nfoo;");
}

#[test]
fn fill_multiline_in_crlf_document() {
    let mut run = t("let foo = { bar: 1 };\r\n// ^?\r\n")
        .ty("foo", "{\n  bar: number;\n}")
        .options(multiline())
        .run();
    run.expect_text("let foo = { bar: 1 };\r\n// ^? {\r\n//      bar: number;\r\n//    }\r\n");
    run.expect_idempotent();
}

#[test]
fn fill_truncates_long_single_line_types() {
    let long = "x".repeat(150);
    let run = t("let foo = 1;\n// ^?").ty("foo", &long).run();
    let expected = format!("let foo = 1;\n// ^? {}…", "x".repeat(100));
    run.expect_text(&expected);

    let run = t("let foo = 1;\n// ^?")
        .ty("foo", &long)
        .options(Options {
            disable_truncation: true,
            ..Options::default()
        })
        .run();
    run.expect_text(&format!("let foo = 1;\n// ^? {long}"));
}

#[test]
fn fill_compact_output() {
    let parts = vec![
        DisplayPart::keyword("let"),
        DisplayPart::space(),
        DisplayPart::new("localName", "foo"),
        DisplayPart::punctuation(":"),
        DisplayPart::space(),
        DisplayPart::punctuation("{"),
        DisplayPart::space(),
        DisplayPart::new("propertyName", "bar"),
        DisplayPart::punctuation(":"),
        DisplayPart::space(),
        DisplayPart::keyword("number"),
        DisplayPart::space(),
        DisplayPart::punctuation("}"),
    ];

    t("let foo = { bar: 1 };\n// ^?")
        .parts("foo", parts.clone())
        .run()
        .expect_text("let foo = { bar: 1 };\n// ^? let foo: { bar: number }");

    t("let foo = { bar: 1 };\n// ^?")
        .parts("foo", parts)
        .options(Options {
            compact_output: true,
            ..Options::default()
        })
        .run()
        .expect_text("let foo = { bar: 1 };\n// ^? { bar: number }");
}

#[test]
fn fill_marker_order_does_not_change_result() {
    let source = "let a = 1; //=>\nlet b = 2;\n// ^?\n";
    let sequential = t(source).ty("1", "number").ty("b", "2").run();
    let interleaved = t(source)
        .ty("1", "number")
        .ty("b", "2")
        .config(PassConfig {
            marker_order: MarkerOrder::Document,
            ..PassConfig::default()
        })
        .run();

    assert_eq!(sequential.text(), interleaved.text());
    insta::assert_snapshot!(sequential.text().trim_end(), @r"
let a = 1; //=> number
let b = 2;
// ^? 2
");
}

/// Reports a new version on every read, as if the user kept typing during the pass.
struct TypingModel {
    inner: MemoryDocument,
    reads: Cell<u64>,
}

impl EditorModel for TypingModel {
    fn uri(&self) -> &str {
        self.inner.uri()
    }

    fn text(&self) -> String {
        self.inner.text()
    }

    fn eol(&self) -> String {
        self.inner.eol()
    }

    fn version(&self) -> u64 {
        self.reads.set(self.reads.get() + 1);
        self.reads.get()
    }

    fn apply_edits(&mut self, edits: &[TextEdit]) -> Result<(), IdeError> {
        self.inner.apply_edits(edits)
    }

    fn execute_edits(&mut self, source: &str, edits: &[TextEdit]) -> Result<(), IdeError> {
        self.inner.execute_edits(source, edits)
    }

    fn push_stack_element(&mut self) {
        self.inner.push_stack_element();
    }

    fn pop_stack_element(&mut self) {
        self.inner.pop_stack_element();
    }
}

#[test]
fn fill_discards_edits_when_document_moved_on() {
    let source = "let foo = 1;\n// ^?";
    let service = StubService::default().with_type("foo", vec![DisplayPart::text("number")]);
    service.set_text(source.to_string());
    let mut model = TypingModel {
        inner: MemoryDocument::new(URI, source),
        reads: Cell::new(0),
    };

    let outcome = block_on(fill_queries(
        &mut model,
        &service,
        &Options::default(),
        ApplyMode::UndoGroup,
        &PassConfig::default(),
    ));

    assert_eq!(outcome, Ok(PassOutcome::Stale));
    assert_eq!(model.inner.text(), source);
}
