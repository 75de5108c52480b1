//! Prompt templates for the suggestion handlers.

/// Sampling temperature for criteria suggestion.
pub const CRITERIA_TEMPERATURE: f32 = 0.7;

/// Sampling temperature for product details.
pub const DETAILS_TEMPERATURE: f32 = 0.5;

/// Sampling temperature for score suggestion.
pub const SCORES_TEMPERATURE: f32 = 0.4;

pub const CRITERIA_SYSTEM_PROMPT: &str = "\
You are a decision-making assistant. Given a decision topic, suggest 5-6 relevant criteria for evaluating options.
You must NOT choose importance weights. Just name the criteria.

Respond with a JSON array only, no markdown or explanation.
Format: [{\"name\": \"Criterion Name\"}, ...]";

pub const DETAILS_SYSTEM_PROMPT: &str = "\
You are a product research assistant.
For each product, you must return JSON describing how that ONE product performs on each decision criterion.
Focus only on factual, concise feature descriptions. Do NOT mention importance or weights.

Respond ONLY with a JSON object, NO markdown, NO extra text.
Format:
{
  \"product\": \"Product Name\",
  \"byCriterion\": {
    \"Criterion name 1\": \"short description focused on this criterion\",
    \"Criterion name 2\": \"short description\",
    ...
  }
}";

pub const SCORES_SYSTEM_PROMPT: &str = "\
You are a decision-scoring assistant.
Your job is to assign numeric ratings from 1 to 10 for how well ONE product satisfies each decision criterion.

Rules:
- 1 = extremely poor fit, 10 = outstanding fit.
- Use the full scale 1-10 where it makes sense.
- Stay consistent across criteria and products.
- Do not include explanations, only the numbers.

Respond ONLY with a JSON object, NO markdown, NO extra text.
Format:
{
  \"product\": \"Product Name\",
  \"scores\": {
    \"Criterion name 1\": 1-10 integer,
    \"Criterion name 2\": 1-10 integer,
    ...
  }
}";

/// User prompt for criteria suggestion. Products are optional context.
pub fn criteria_user_prompt(topic: &str, products: &[String]) -> String {
    let products_context = if products.is_empty() {
        String::new()
    } else {
        format!(" The user is considering these options: {}.", products.join(", "))
    };

    format!(
        "Decision topic: {}.{}\nSuggest criteria the user should consider when making this decision.",
        topic, products_context
    )
}

/// User prompt for one product's details.
pub fn details_user_prompt(topic: &str, product: &str, criterion_names: &[String]) -> String {
    format!(
        "{}\n\nDescribe how this product relates to EACH criterion, returning JSON in the required format.",
        product_context(topic, product, criterion_names)
    )
}

/// User prompt for one product's scores.
pub fn scores_user_prompt(topic: &str, product: &str, criterion_names: &[String]) -> String {
    format!(
        "{}\n\nFor this ONE product, assign a score from 1-10 for each criterion, following the rules. Return JSON only in the required format.",
        product_context(topic, product, criterion_names)
    )
}

fn product_context(topic: &str, product: &str, criterion_names: &[String]) -> String {
    let criteria = criterion_names
        .iter()
        .map(|name| format!("- {}", name))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Decision topic: {}\nProduct: {}\nCriteria:\n{}",
        topic, product, criteria
    )
}
