use std::collections::HashMap;
use std::sync::OnceLock;

use bedtime_core::{
    classify, ChildInfo, ComplexityTier, GenerationPrompt, Language, StoryError, StoryRequest,
    SENTINEL,
};

use crate::PromptTemplate;

/// Used in place of the story details when neither activities nor values are given.
pub const GENERIC_THEME_INSTRUCTION: &str = "No specific details were provided. \
Invent a gentle theme around friendship, kindness, courage, or curiosity.";

const STORY_TEMPLATE: &str = "\
Before writing anything, check the names, activities, toys, and values below. \
If any of them is inappropriate for children, reply only with \"{{sentinel}}\" \
followed by a short explanation. Otherwise, go straight to the story and do not \
mention this check.

Create a bedtime story for the following children:
{{children}}

{{details}}

Please write the story in {{language}}.

The story should be {{complexity}}, as the average age of the children is {{mean_age}} years old.
Adjust the language, concepts, and storyline to be engaging and understandable for children of this age group.

Follow these rules:
{{rules}}";

fn story_template() -> &'static PromptTemplate {
    static TEMPLATE: OnceLock<PromptTemplate> = OnceLock::new();
    TEMPLATE.get_or_init(|| PromptTemplate::new(STORY_TEMPLATE))
}

fn non_blank(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn render_children(children: &[ChildInfo]) -> String {
    children
        .iter()
        .map(|child| format!("{}, {} years old", child.name, child.age))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_details(activities: Option<&str>, values: Option<&str>) -> String {
    if activities.is_none() && values.is_none() {
        return GENERIC_THEME_INSTRUCTION.to_string();
    }

    let mut lines = vec!["Story details:".to_string()];
    if let Some(activities) = activities {
        lines.push(format!("Activities, toys, and events: {activities}"));
    }
    if let Some(values) = values {
        lines.push(format!("Values to teach: {values}"));
    }
    lines.join("\n")
}

fn render_rules(activities: Option<&str>, values: Option<&str>) -> String {
    let mut rules = vec![
        "- Give the story a clear beginning, middle, and end.",
        "- Keep the tone calm and reassuring so the children can wind down for sleep.",
    ];
    if activities.is_some() {
        rules.push("- Weave the mentioned activities and events into the plot.");
        rules.push("- If toys are mentioned, make them the protagonists of the story.");
    }
    if values.is_some() {
        rules.push("- Make the values central to the plot and to the characters' actions.");
    }
    rules.join("\n")
}

/// Assembles the generation prompt. Pure: equal inputs give byte-identical
/// output, and free-text fields are compared after trimming.
pub fn build(
    children: &[ChildInfo],
    activities_and_toys: &str,
    values_to_teach: &str,
    language: Language,
    tier: ComplexityTier,
    mean_age: f64,
) -> GenerationPrompt {
    let activities = non_blank(activities_and_toys);
    let values = non_blank(values_to_teach);

    let vars = HashMap::from([
        ("sentinel", SENTINEL.to_string()),
        ("children", render_children(children)),
        ("details", render_details(activities, values)),
        ("language", language.label().to_string()),
        ("complexity", tier.description().to_string()),
        ("mean_age", format!("{mean_age:.1}")),
        ("rules", render_rules(activities, values)),
    ]);

    GenerationPrompt::new(story_template().render(&vars))
}

/// Classifies the request's ages and builds its prompt.
pub fn build_for_request(
    request: &StoryRequest,
) -> Result<(GenerationPrompt, ComplexityTier, f64), StoryError> {
    let (tier, mean_age) = classify(&request.ages())?;
    let prompt = build(
        request.children(),
        request.activities_and_toys(),
        request.values_to_teach(),
        request.language(),
        tier,
        mean_age,
    );
    Ok((prompt, tier, mean_age))
}
