//! Scripted stimulus/expected-output cases.
//!
//! Each case runs against a freshly built informer with captured streams;
//! the harness diffs every stream against the expected text and the whole
//! table must pass.

use inform::testing::{Case, Runner};
use inform::{Inform, Message, Scope, ScopeChain, fmt_at};

/// Emit one line per nesting level, resolving `lvl` `offset` scopes out
/// from the innermost, mirroring a chain of nested functions that each
/// shadow `lvl` with their own depth.
fn fmt_cascade(informer: &Inform, offset: isize) {
    let mut chain = ScopeChain::new();
    for (depth, name) in ["func0", "func1", "func2", "func3"].iter().enumerate() {
        chain.push(Scope::new().bind("lvl", depth));
        match fmt_at("{lvl}", &chain, offset) {
            Ok(value) => informer.display(format!("{name} -> {value}")),
            Err(_) => informer.display(format!("'lvl' not found in {name}")),
        }
    }
}

fn fmt_cascade_at_own_level(informer: &Inform) {
    fmt_cascade(informer, 0);
}

fn fmt_cascade_one_level_out(informer: &Inform) {
    fmt_cascade(informer, -1);
}

fn fmt_cascade_two_levels_out(informer: &Inform) {
    fmt_cascade(informer, -2);
}

#[test]
fn scripted_cases() {
    let report = Runner::new()
        .case(
            Case::new("output without a logfile", |informer| {
                informer.output("this is a test.");
            })
            .given(r#"informer.output("this is a test.")"#)
            .without_logfile()
            .expect_stdout("this is a test."),
        )
        .case(
            Case::new("log reaches only the logfile", |informer| {
                informer.log("This is a test.");
            })
            .given(r#"informer.log("This is a test.")"#)
            .expect_logfile("Invoked as <exe> on <date>.\nThis is a test."),
        )
        .case(
            Case::new("output joins parts with spaces", |informer| {
                informer.output(Message::from_parts(["This", "is", "a", "test."]));
            })
            .given(r#"informer.output(Message::from_parts(["This", "is", "a", "test."]))"#)
            .expect_stdout("This is a test.")
            .expect_logfile("Invoked as <exe> on <date>.\nThis is a test."),
        )
        .case(
            Case::new("separator and terminator overrides", |informer| {
                informer.output(Message::from_parts(["This", "is", "a", "test"]).sep("_").end("."));
            })
            .given(r#"informer.output(Message::from_parts(["This", "is", "a", "test"]).sep("_").end("."))"#)
            .expect_stdout("This_is_a_test.")
            .expect_logfile("Invoked as <exe> on <date>.\nThis_is_a_test."),
        )
        .case(
            Case::new("comment shown when verbose", |informer| {
                informer.comment("This is a test.");
            })
            .given(r#"informer.comment("This is a test.")"#)
            .configure(|builder| builder.verbose(true))
            .expect_stdout("This is a test.")
            .expect_logfile("Invoked as <exe> on <date>.\nThis is a test."),
        )
        .case(
            Case::new("comment logged when not verbose", |informer| {
                informer.comment("This is a test.");
            })
            .given(r#"informer.comment("This is a test.")"#)
            .expect_logfile("Invoked as <exe> on <date>.\nThis is a test."),
        )
        .case(
            Case::new("narration shown when narrating", |informer| {
                informer.narrate("This is a test.");
            })
            .given(r#"informer.narrate("This is a test.")"#)
            .configure(|builder| builder.narrate(true))
            .expect_stdout("This is a test.")
            .expect_logfile("Invoked as <exe> on <date>.\nThis is a test."),
        )
        .case(
            Case::new("narration logged when not narrating", |informer| {
                informer.narrate("This is a test.");
            })
            .given(r#"informer.narrate("This is a test.")"#)
            .expect_logfile("Invoked as <exe> on <date>.\nThis is a test."),
        )
        .case(
            Case::new("display", |informer| {
                informer.display("This is a test.");
            })
            .given(r#"informer.display("This is a test.")"#)
            .expect_stdout("This is a test.")
            .expect_logfile("Invoked as <exe> on <date>.\nThis is a test."),
        )
        .case(
            Case::new("quiet suppresses display but not the logfile", |informer| {
                informer.display("This is a test.");
            })
            .given(r#"informer.display("This is a test.")"#)
            .configure(|builder| builder.quiet(true))
            .expect_logfile("Invoked as <exe> on <date>.\nThis is a test."),
        )
        .case(
            Case::new("debug shown when enabled", |informer| {
                informer.debug("This is a test.");
            })
            .given(r#"informer.debug("This is a test.")"#)
            .configure(|builder| builder.debug(true))
            .expect_stdout("inform DEBUG: This is a test.")
            .expect_logfile("Invoked as <exe> on <date>.\ninform DEBUG: This is a test."),
        )
        .case(
            Case::new("debug logged when disabled", |informer| {
                informer.debug("This is a test.");
            })
            .given(r#"informer.debug("This is a test.")"#)
            .expect_logfile("Invoked as <exe> on <date>.\ninform DEBUG: This is a test."),
        )
        .case(
            Case::new("warning goes to stderr", |informer| {
                informer.warn("This is a test.");
            })
            .given(r#"informer.warn("This is a test.")"#)
            .expect_stderr("inform warning: This is a test.")
            .expect_logfile("Invoked as <exe> on <date>.\ninform warning: This is a test."),
        )
        .case(
            Case::new("error goes to stderr", |informer| {
                informer.error("This is a test.");
            })
            .given(r#"informer.error("This is a test.")"#)
            .expect_stderr("inform error: This is a test.")
            .expect_logfile("Invoked as <exe> on <date>.\ninform error: This is a test."),
        )
        .case(
            Case::new("quiet leaves stderr alone", |informer| {
                informer.error("This is a test.");
            })
            .given(r#"informer.error("This is a test.")"#)
            .configure(|builder| builder.quiet(true))
            .expect_stderr("inform error: This is a test.")
            .expect_logfile("Invoked as <exe> on <date>.\ninform error: This is a test."),
        )
        .case(
            Case::new("mute silences both consoles", |informer| {
                informer.display("plain");
                informer.error("broken");
            })
            .given(r#"informer.display("plain"); informer.error("broken")"#)
            .configure(|builder| builder.mute(true))
            .expect_logfile("Invoked as <exe> on <date>.\nplain\ninform error: broken"),
        )
        .case(
            Case::new("codicil follows a warning, indented", |informer| {
                informer.warn("This is a test.");
                informer.codicil("This is an appendage.");
            })
            .given(r#"informer.warn("This is a test."); informer.codicil("This is an appendage.")"#)
            .expect_stderr("inform warning: This is a test.\n    This is an appendage.")
            .expect_logfile(
                "Invoked as <exe> on <date>.\ninform warning: This is a test.\n    This is an appendage.",
            ),
        )
        .case(
            Case::new("codicils stack under an empty error", |informer| {
                informer.error("");
                informer.codicil("This is the first appendage.");
                informer.codicil("This is the second appendage.");
                informer.codicil("This is the third appendage.");
            })
            .given(r#"informer.error(""); informer.codicil(...) three times"#)
            .expect_stderr(
                "inform error: \n    This is the first appendage.\n    This is the second appendage.\n    This is the third appendage.",
            )
            .expect_logfile(
                "Invoked as <exe> on <date>.\ninform error: \n    This is the first appendage.\n    This is the second appendage.\n    This is the third appendage.",
            ),
        )
        .case(
            Case::new("multi-line codicil keeps its own indentation", |informer| {
                informer.error("");
                informer.codicil("This is the first appendage.");
                informer.codicil("This is the second appendage,\n   and the third.");
            })
            .given(r#"informer.error(""); informer.codicil("This is the second appendage,\n   and the third.")"#)
            .expect_stderr(
                "inform error: \n    This is the first appendage.\n    This is the second appendage,\n       and the third.",
            )
            .expect_logfile(
                "Invoked as <exe> on <date>.\ninform error: \n    This is the first appendage.\n    This is the second appendage,\n       and the third.",
            ),
        )
        .case(
            Case::new("codicils after unlabeled output are bare", |informer| {
                informer.output("This is main message.");
                informer.codicil("This is the first appendage.");
                informer.codicil("This is the second appendage.");
                informer.codicil("This is the third appendage.");
            })
            .given(r#"informer.output("This is main message."); informer.codicil(...) three times"#)
            .expect_stdout(
                "This is main message.\nThis is the first appendage.\nThis is the second appendage.\nThis is the third appendage.",
            )
            .expect_logfile(
                "Invoked as <exe> on <date>.\nThis is main message.\nThis is the first appendage.\nThis is the second appendage.\nThis is the third appendage.",
            ),
        )
        .case(
            Case::new("multi-line error message is indented under its header", |informer| {
                informer.error("Error message.\nAdditional info.");
            })
            .given(r#"informer.error("Error message.\nAdditional info.")"#)
            .expect_stderr("inform error:\n    Error message.\n    Additional info.")
            .expect_logfile(
                "Invoked as <exe> on <date>.\ninform error:\n    Error message.\n    Additional info.",
            ),
        )
        .case(
            Case::new("codicil without a prior message renders bare", |informer| {
                informer.codicil("This is an appendage.");
            })
            .given(r#"informer.codicil("This is an appendage.")"#)
            .expect_stdout("This is an appendage.")
            .expect_logfile("Invoked as <exe> on <date>.\nThis is an appendage."),
        )
        .case(
            Case::new("scope lookup at the caller's own level", fmt_cascade_at_own_level)
                .given("fmt_cascade(informer, 0)")
                .without_logfile()
                .expect_stdout("func0 -> 0\nfunc1 -> 1\nfunc2 -> 2\nfunc3 -> 3"),
        )
        .case(
            Case::new("scope lookup one level out", fmt_cascade_one_level_out)
                .given("fmt_cascade(informer, -1)")
                .without_logfile()
                .expect_stdout("'lvl' not found in func0\nfunc1 -> 0\nfunc2 -> 1\nfunc3 -> 2"),
        )
        .case(
            Case::new("scope lookup two levels out", fmt_cascade_two_levels_out)
                .given("fmt_cascade(informer, -2)")
                .without_logfile()
                .expect_stdout(
                    "'lvl' not found in func0\n'lvl' not found in func1\nfunc2 -> 0\nfunc3 -> 1",
                ),
        )
        .run();

    report.assert_passed();
    assert_eq!(report.run, 25);
}
