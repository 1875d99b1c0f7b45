use bedtime_core::{check, GenerationResult, ModerationVerdict, StoryError, SENTINEL};

#[test]
fn sentinel_prefix_is_moderated_with_explanation() {
    let raw = format!("{SENTINEL} inappropriate language");
    let err = check(raw).unwrap_err();
    assert_eq!(
        err,
        StoryError::ModeratedContent {
            explanation: "inappropriate language".to_string()
        }
    );
}

#[test]
fn sentinel_without_explanation_is_still_moderated() {
    let verdict = ModerationVerdict::inspect(SENTINEL.to_string());
    assert_eq!(
        verdict,
        ModerationVerdict::Flagged {
            explanation: String::new()
        }
    );
}

#[test]
fn story_text_is_returned_verbatim() {
    let raw = "  Once upon a time, Mia hugged her teddy bear.\n\nThe end.\n";
    assert_eq!(check(raw).unwrap(), raw);
}

#[test]
fn sentinel_mid_string_is_not_moderation() {
    let raw = format!("Once upon a time someone wrote {SENTINEL} on a wall.");
    assert_eq!(check(raw.clone()).unwrap(), raw);
}

#[test]
fn leading_whitespace_or_case_variants_do_not_match() {
    let indented = format!(" {SENTINEL} bad");
    assert!(check(indented).is_ok());

    let lowered = format!("{} bad", SENTINEL.to_lowercase());
    assert!(check(lowered).is_ok());
}

#[test]
fn generation_result_carries_the_single_moderation_decision() {
    let flagged = GenerationResult::new(format!("{SENTINEL}  scary toy "), 1.24);
    assert!(flagged.moderated);
    assert_eq!(
        ModerationVerdict::from(flagged),
        ModerationVerdict::Flagged {
            explanation: "scary toy".to_string()
        }
    );

    let story = GenerationResult::new(format!("A tale about {SENTINEL}"), 0.5);
    assert!(!story.moderated);
    assert_eq!(
        ModerationVerdict::from(story),
        ModerationVerdict::Story(format!("A tale about {SENTINEL}"))
    );
}
