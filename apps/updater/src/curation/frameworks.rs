//! Framework/technology label inference and display label composition.

/// Fixed keyword-to-label table scanned against lowercased context
/// text. Order controls first-seen ranking for tied counts.
const FRAMEWORK_KEYWORDS: &[(&str, &str)] = &[
    ("react", "React"),
    ("next.js", "Next.js"),
    ("nextjs", "Next.js"),
    ("vue", "Vue"),
    ("angular", "Angular"),
    ("django", "Django"),
    ("flask", "Flask"),
    ("fastapi", "FastAPI"),
    ("spring", "Spring"),
    ("laravel", "Laravel"),
    ("express", "Express"),
    ("node", "Node.js"),
    ("microservice", "Microservices"),
    ("microservices", "Microservices"),
    ("mvc", "MVC"),
    ("rest", "REST API"),
    ("graphql", "GraphQL"),
    ("docker", "Docker"),
    ("kubernetes", "Kubernetes"),
    ("azure", "Azure"),
    ("unity", "Unity"),
    ("shaderlab", "ShaderLab"),
];

/// Label returned when neither language usage nor inferred frameworks
/// produce anything.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Counts overlap-tolerant occurrences of `needle` in `haystack`.
fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    let mut count = 0;
    let mut offset = 0;
    while let Some(pos) = haystack[offset..].find(needle) {
        count += 1;
        offset += pos + 1;
    }
    count
}

/// Infers framework/technology labels from context text.
///
/// Counts keyword occurrences per label and returns labels ranked by
/// count descending; ties keep table order.
pub fn infer_frameworks(text: &str) -> Vec<(&'static str, usize)> {
    let lowered = text.to_lowercase();
    let mut scores: Vec<(&'static str, usize)> = Vec::new();

    for (keyword, label) in FRAMEWORK_KEYWORDS {
        let count = count_occurrences(&lowered, keyword);
        if count == 0 {
            continue;
        }
        match scores.iter_mut().find(|(name, _)| name == label) {
            Some((_, total)) => *total += count,
            None => scores.push((label, count)),
        }
    }

    scores.sort_by(|a, b| b.1.cmp(&a.1));
    scores
}

/// Composes the displayed language/framework label string.
///
/// Takes up to `cap` unique language names in the byte-ranked order
/// given, then tops up with inferred framework labels not already
/// chosen, in their ranked order. Returns `"Not specified"` when the
/// merged list is empty.
pub fn select_languages(
    language_usage: &[(String, u64)],
    context_text: &str,
    cap: usize,
) -> String {
    let mut merged: Vec<&str> = Vec::new();

    for (language, _) in language_usage {
        if merged.len() >= cap {
            break;
        }
        if !language.is_empty() && !merged.contains(&language.as_str()) {
            merged.push(language);
        }
    }

    if merged.len() < cap {
        for (framework, _) in infer_frameworks(context_text) {
            if merged.len() >= cap {
                break;
            }
            if !merged.contains(&framework) {
                merged.push(framework);
            }
        }
    }

    if merged.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        merged.join(", ")
    }
}
