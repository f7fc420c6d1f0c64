use serde_json::Value;

/// Print just the key answer value from the output.
///
/// A graded result prints as "letter (score)"; otherwise a priority list
/// of well-known result fields is tried, then the first field.
pub fn print_minimal(value: &Value) {
    // Try to extract the "result" envelope
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        // A grade, either standalone or nested in the full analysis
        let graded = if map.contains_key("letter_grade") {
            Some(result_obj)
        } else {
            map.get("grade")
        };
        if let Some(Value::Object(g)) = graded {
            if let (Some(letter), Some(score)) = (g.get("letter_grade"), g.get("score")) {
                println!("{} ({})", format_minimal(letter), format_minimal(score));
                return;
            }
        }

        // Priority list of key output fields (skip null values)
        let priority_keys = ["rate_pct", "monthly_payment", "irr_pct", "score"];
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        // Fall back to first field
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    // Not an object, just print directly
    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
