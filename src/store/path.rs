//! Property path lookup into JSON values
//!
//! Supports `data.user.name`, `items[0].price` and `items.0.price`.

use serde_json::Value;

/// One step of a property path
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
    Key(&'a str),
    Index(usize),
}

/// Look up `path` in `value`; an empty path returns `value` itself
pub fn lookup<'v>(value: &'v Value, path: &str) -> Option<&'v Value> {
    let mut current = value;
    for segment in parse(path)? {
        current = match (segment, current) {
            (Segment::Index(i), Value::Array(items)) => items.get(i)?,
            (Segment::Key(k), Value::Array(items)) => items.get(k.parse::<usize>().ok()?)?,
            (Segment::Key(k), Value::Object(map)) => map.get(k)?,
            (Segment::Index(i), Value::Object(map)) => map.get(&i.to_string())?,
            _ => return None,
        };
    }
    Some(current)
}

/// Split `key.rest.of.path` into the store key and the remaining path
pub fn split_response_path(response_path: &str) -> (&str, &str) {
    match response_path.split_once('.') {
        Some((key, path)) => (key, path),
        None => (response_path, ""),
    }
}

fn parse(path: &str) -> Option<Vec<Segment<'_>>> {
    let mut segments = Vec::new();
    if path.is_empty() {
        return Some(segments);
    }

    for part in path.split('.') {
        let (name, mut rest) = match part.find('[') {
            Some(pos) => (&part[..pos], &part[pos..]),
            None => (part, ""),
        };

        if !name.is_empty() {
            segments.push(Segment::Key(name));
        } else if rest.is_empty() {
            return None;
        }

        while !rest.is_empty() {
            let inner = rest.strip_prefix('[')?;
            let close = inner.find(']')?;
            let index = inner[..close].trim().trim_matches(|c| c == '"' || c == '\'');
            match index.parse::<usize>() {
                Ok(i) => segments.push(Segment::Index(i)),
                Err(_) => segments.push(Segment::Key(index)),
            }
            rest = &inner[close + 1..];
        }
    }

    Some(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_nested() {
        let value = json!({"data": {"user": {"name": "Ada", "tags": ["a", "b"]}}});

        assert_eq!(lookup(&value, "data.user.name"), Some(&json!("Ada")));
        assert_eq!(lookup(&value, "data.user.tags[1]"), Some(&json!("b")));
        assert_eq!(lookup(&value, "data.user.tags.0"), Some(&json!("a")));
        assert_eq!(lookup(&value, ""), Some(&value));
    }

    #[test]
    fn test_lookup_missing() {
        let value = json!({"items": [{"price": 9.99}]});

        assert_eq!(lookup(&value, "items[0].price"), Some(&json!(9.99)));
        assert_eq!(lookup(&value, "items[3].price"), None);
        assert_eq!(lookup(&value, "items.price"), None);
        assert_eq!(lookup(&value, "items[0].price.currency"), None);
        assert_eq!(lookup(&value, "a..b"), None);
    }

    #[test]
    fn test_lookup_quoted_bracket_key() {
        let value = json!({"headers": {"content-type": "application/json"}});
        assert_eq!(
            lookup(&value, "headers['content-type']"),
            Some(&json!("application/json"))
        );
    }

    #[test]
    fn test_split_response_path() {
        assert_eq!(split_response_path("userProfile.name"), ("userProfile", "name"));
        assert_eq!(split_response_path("product.items[0].id"), ("product", "items[0].id"));
        assert_eq!(split_response_path("token"), ("token", ""));
    }
}
