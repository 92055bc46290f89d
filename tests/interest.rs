#![allow(missing_docs)]
// End-to-end tests for interest/engagement scoring.

use chaperone::interest::{analyze_interest, InterestLevel};

#[test]
fn engaged_transcript_reports_full_question_rate() {
    let transcript =
        "You: hi\nThem: hey! how are you? 😊\nYou: good\nThem: what are you up to this weekend? 😍";
    let analysis = analyze_interest(transcript);

    assert!(
        (analysis.engagement.question_rate - 100.0).abs() < f64::EPSILON,
        "both of their messages ask a question"
    );
    assert_ne!(
        analysis.level,
        InterestLevel::LowInterest,
        "high question rate and enthusiasm must not read as low interest"
    );
}

#[test]
fn empty_transcript_yields_no_data_not_a_panic() {
    let analysis = analyze_interest("");
    assert_eq!(analysis.level, InterestLevel::NoData);
    assert_eq!(analysis.overall_score, 0);
}

#[test]
fn one_sided_transcript_yields_no_data() {
    let analysis = analyze_interest("me: hello?\nme: hey, you there?\nme: ok then");
    assert_eq!(analysis.level, InterestLevel::NoData);
    assert_eq!(analysis.engagement.user_messages, 3);
    assert_eq!(analysis.engagement.contact_messages, 0);
}

#[test]
fn terse_disengaged_replies_read_as_low_interest() {
    let transcript = "me: how was your weekend? tell me everything\n\
                      them: fine\n\
                      me: I tried that new ramen place, you'd love it!\n\
                      them: ok\n\
                      me: want to go sometime?\n\
                      them: busy";
    let analysis = analyze_interest(transcript);
    assert_eq!(analysis.level, InterestLevel::LowInterest);
}

#[test]
fn unlabeled_transcript_alternates_starting_with_user() {
    let analysis = analyze_interest("hey\nhi! how's it going?\npretty good\nnice! any plans? 😊");
    // Lines 2 and 4 land on the other side under strict alternation.
    assert_eq!(analysis.engagement.contact_messages, 2);
    assert_eq!(analysis.engagement.user_messages, 2);
    assert!((analysis.engagement.question_rate - 100.0).abs() < f64::EPSILON);
}

#[test]
fn arbitrary_name_prefixes_count_as_the_other_side() {
    let analysis = analyze_interest("me: hi\nJordan: hey, good to match with you!");
    assert_eq!(analysis.engagement.contact_messages, 1);
}

#[test]
fn flirty_messages_raise_enthusiasm() {
    let transcript = "me: hey\n\
                      them: hey cute, you seem adorable\n\
                      me: thanks\n\
                      them: can't stop thinking of you, let's plan a date";
    let analysis = analyze_interest(transcript);
    assert_eq!(analysis.scores.enthusiasm, 90, "three or more flirty words");
}

#[test]
fn overall_score_is_bounded() {
    for transcript in [
        "me: hi\nthem: hey! this is great, you're awesome! wanna grab food? 😊😍",
        "me: hi\nthem: no",
        "",
    ] {
        let analysis = analyze_interest(transcript);
        assert!(analysis.overall_score <= 100);
    }
}

#[test]
fn interest_analysis_serializes_to_json() {
    let analysis = analyze_interest("me: hi\nthem: hello there! how are you?");
    let json = serde_json::to_string(&analysis).expect("should serialize");
    assert!(json.contains("overall_score"));
    assert!(json.contains("question_rate"));
}
