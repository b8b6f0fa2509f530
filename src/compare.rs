use crate::element::Element;

/// Walks two element trees in lockstep (depth-first, pre-order) and
/// returns one rendered message per discrepancy, in discovery order.
/// Children are paired by position; no alignment is attempted, so an
/// insertion on one side cascades into per-index mismatches below it.
pub fn compare_elements(a: &Element, b: &Element, path: &str) -> Vec<String> {
    let mut diffs = Vec::new();
    let current_path = if path.is_empty() {
        a.tag.clone()
    } else {
        format!("{path}/{}", a.tag)
    };

    // 1. Tag mismatch (log and continue)
    if a.tag != b.tag {
        diffs.push(format!(
            "Tag mismatch at {current_path}: '{}' != '{}'",
            a.tag, b.tag
        ));
    }

    // 2. Text content mismatch
    let text_a = a.text.as_deref().unwrap_or("").trim();
    let text_b = b.text.as_deref().unwrap_or("").trim();
    if text_a != text_b {
        diffs.push(format!(
            "Text mismatch at {current_path}: '{text_a}' != '{text_b}'"
        ));
    }

    // 3. Attribute comparison: extras on either side, then shared keys
    for (key, value) in &a.attrs {
        if !b.attrs.contains_key(key) {
            diffs.push(format!(
                "Extra attribute in file1 at {current_path}: '{key}' = '{value}'"
            ));
        }
    }
    for (key, value) in &b.attrs {
        if !a.attrs.contains_key(key) {
            diffs.push(format!(
                "Extra attribute in file2 at {current_path}: '{key}' = '{value}'"
            ));
        }
    }
    for (key, value_a) in &a.attrs {
        if let Some(value_b) = b.attrs.get(key) {
            if value_a != value_b {
                diffs.push(format!(
                    "Attribute value mismatch at {current_path} for '{key}': '{value_a}' != '{value_b}'"
                ));
            }
        }
    }

    // 4. Child elements comparison
    if a.children.len() != b.children.len() {
        diffs.push(format!(
            "Children count mismatch at {current_path}: {} != {}",
            a.children.len(),
            b.children.len()
        ));
    }

    for (i, (child_a, child_b)) in a.children.iter().zip(b.children.iter()).enumerate() {
        let child_path = format!("{current_path}[{i}]");
        diffs.extend(compare_elements(child_a, child_b, &child_path));
    }

    // If one has more children than the other
    if a.children.len() > b.children.len() {
        for extra in &a.children[b.children.len()..] {
            diffs.push(format!(
                "Extra child in file1 at {current_path}: <{}>",
                extra.tag
            ));
        }
    } else if b.children.len() > a.children.len() {
        for extra in &b.children[a.children.len()..] {
            diffs.push(format!(
                "Extra child in file2 at {current_path}: <{}>",
                extra.tag
            ));
        }
    }

    diffs
}
