use faith_poll::poll::parser::{decorate, parse};
use faith_poll::poll::types::{DisplayOption, FALLBACK_QUESTION, OPTION_MARKERS};

#[test]
fn test_scenario_reply_is_split_into_question_and_options() {
    let raw = "Question here ### extra\n[\"A\",\"B\",\"C\",\"D\"]\n**Options:** ignored";
    let poll = parse(raw);

    assert_eq!(poll.question, "Question here");
    assert_eq!(poll.options, vec!["A", "B", "C", "D"]);

    let display = decorate(&poll.options);
    assert_eq!(display.len(), 4);
    for (i, opt) in display.iter().enumerate() {
        assert_eq!(opt.text, format!("{} {}", OPTION_MARKERS[i], poll.options[i]));
        assert_eq!(opt.value, poll.options[i]);
        assert!(!opt.selected);
    }
}

#[test]
fn test_prose_around_array_is_kept_as_question() {
    let raw = "1. Should the court allow religious attire in public schools?\n\n\
               [\"Yes, fully\", \"Only in some cases\", \"No\", \"Undecided\"]\n\n### Notes\nthe model rambles";
    let poll = parse(raw);

    assert_eq!(poll.question, "Should the court allow religious attire in public schools?");
    assert_eq!(poll.options.len(), 4);
    assert_eq!(poll.options[1], "Only in some cases");
}

#[test]
fn test_no_array_forces_fallback() {
    let poll = parse("What do you believe about this?\nA) yes\nB) no");
    assert_eq!(poll.question, FALLBACK_QUESTION);
    assert!(poll.options.is_empty());
}

#[test]
fn test_empty_reply_matches_no_array_case() {
    assert_eq!(parse(""), parse("no brackets at all"));
    assert!(parse("").is_fallback());
}

#[test]
fn test_malformed_array_degrades_silently() {
    let poll = parse("Is it right? [\"A\", \"B\", oops]");
    assert!(poll.is_fallback());

    let unterminated = parse("Is it right? [\"A\", \"B\"");
    assert!(unterminated.is_fallback());
}

#[test]
fn test_empty_array_keeps_question() {
    let poll = parse("Is prayer a private matter? []");
    assert_eq!(poll.question, "Is prayer a private matter?");
    assert!(poll.options.is_empty());
    assert!(decorate(&poll.options).is_empty());
}

#[test]
fn test_variable_option_counts_are_accepted() {
    assert_eq!(parse("Three? [\"a\",\"b\",\"c\"]").options.len(), 3);
    assert_eq!(parse("Five? [\"a\",\"b\",\"c\",\"d\",\"e\"]").options.len(), 5);
}

#[test]
fn test_first_array_wins() {
    let poll = parse("Which? [\"first\"] and later [\"second\"]");
    assert_eq!(poll.options, vec!["first"]);
    assert_eq!(poll.question, "Which?  and later [\"second\"]");
}

#[test]
fn test_array_spanning_lines_is_found() {
    let raw = "Pick a view\n[\n  \"Compassion\",\n  \"Duty\"\n]";
    let poll = parse(raw);
    assert_eq!(poll.options, vec!["Compassion", "Duty"]);
    assert_eq!(poll.question, "Pick a view");
}

#[test]
fn test_question_blank_after_stripping_uses_fallback_text() {
    let poll = parse("[\"A\",\"B\"]\n### heading only");
    assert_eq!(poll.question, FALLBACK_QUESTION);
    assert_eq!(poll.options, vec!["A", "B"]);
}

#[test]
fn test_markers_cycle_every_eight() {
    let options: Vec<String> = (0..9).map(|i| format!("opt{}", i)).collect();
    let display = decorate(&options);

    assert_eq!(DisplayOption::marker_for(8), DisplayOption::marker_for(0));
    assert!(display[8].text.starts_with(OPTION_MARKERS[0]));
    assert!(display[7].text.starts_with(OPTION_MARKERS[7]));
    // decoration never leaks into the stored value
    assert_eq!(display[8].value, "opt8");
}

#[test]
fn test_leading_heading_does_not_erase_question() {
    let raw = "### Faith Poll\n1. Should schools allow religious attire?\n[\"Yes\",\"No\",\"Depends\",\"Unsure\"]";
    let poll = parse(raw);

    assert_eq!(poll.question, "Should schools allow religious attire?");
    assert_eq!(poll.options, vec!["Yes", "No", "Depends", "Unsure"]);
}

#[test]
fn test_leading_and_trailing_headings_together() {
    let raw = "### Poll\nIs fasting a personal choice?\n### Options\n[\"Yes\",\"No\"]";
    let poll = parse(raw);

    assert_eq!(poll.question, "Is fasting a personal choice?");
    assert_eq!(poll.options, vec!["Yes", "No"]);
}

#[test]
fn test_many_stray_brackets_still_find_the_array() {
    let noise = "[see note] ".repeat(5_000);
    let raw = format!("Should ritual be public? {} [\"Yes\",\"No\"]", noise);
    let poll = parse(&raw);

    assert_eq!(poll.options, vec!["Yes", "No"]);
    assert!(poll.question.starts_with("Should ritual be public?"));
}
