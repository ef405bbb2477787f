//! Field resolution and expression assembly.
//!
//! Maps carry no iteration order, so anything that turns a map into SQL text
//! goes through [`resolve_fields`] / [`resolve_kv`] first. The canonical order
//! is lexicographic ascending on the field name.

use std::collections::HashMap;

/// Return the field names of `fields` in canonical order.
pub fn resolve_fields<V>(fields: &HashMap<String, V>) -> Vec<&str> {
    let mut keys: Vec<&str> = fields.keys().map(String::as_str).collect();
    keys.sort_unstable();
    keys
}

/// Return the field names of `fields` in canonical order, together with their
/// values in the same order.
pub fn resolve_kv<V>(fields: &HashMap<String, V>) -> (Vec<&str>, Vec<&V>) {
    let mut pairs: Vec<(&str, &V)> = fields.iter().map(|(k, v)| (k.as_str(), v)).collect();
    pairs.sort_unstable_by(|a, b| a.0.cmp(b.0));
    pairs.into_iter().unzip()
}

/// Render `<field><op>?`.
///
/// The operator is not validated.
pub fn assemble_expression(field: &str, op: &str) -> String {
    format!("{field}{op}?")
}

/// Render a placeholder group `(?,?,...)` with `n` placeholders.
pub(crate) fn placeholder_group(n: usize) -> String {
    let mut s = String::with_capacity(2 + n * 2);
    s.push('(');
    for i in 0..n {
        if i > 0 {
            s.push(',');
        }
        s.push('?');
    }
    s.push(')');
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, i32)]) -> HashMap<String, i32> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn resolve_fields_sorts() {
        let m = map(&[("foo", 1), ("bar", 2), ("qq", 3), ("asd", 4)]);
        assert_eq!(resolve_fields(&m), vec!["asd", "bar", "foo", "qq"]);
    }

    #[test]
    fn resolve_fields_is_deterministic() {
        let m = map(&[("zeta", 1), ("alpha", 2), ("mid", 3), ("Beta", 4)]);
        let first = resolve_fields(&m);
        for _ in 0..10 {
            assert_eq!(resolve_fields(&m), first);
        }
        // Byte order: uppercase sorts before lowercase.
        assert_eq!(first, vec!["Beta", "alpha", "mid", "zeta"]);
    }

    #[test]
    fn resolve_kv_keeps_values_aligned() {
        let m: HashMap<String, &str> = [("qq", "ttt"), ("some", "123"), ("other", "456")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let (keys, vals) = resolve_kv(&m);
        assert_eq!(keys, vec!["other", "qq", "some"]);
        assert_eq!(vals, vec![&"456", &"ttt", &"123"]);
    }

    #[test]
    fn resolve_empty() {
        let m: HashMap<String, i32> = HashMap::new();
        assert!(resolve_fields(&m).is_empty());
        let (keys, vals) = resolve_kv(&m);
        assert!(keys.is_empty());
        assert!(vals.is_empty());
    }

    #[test]
    fn assemble() {
        assert_eq!(assemble_expression("foo", "="), "foo=?");
        assert_eq!(assemble_expression("qq", "<>"), "qq<>?");
        assert_eq!(assemble_expression("age", " LIKE "), "age LIKE ?");
    }

    #[test]
    fn placeholders() {
        assert_eq!(placeholder_group(1), "(?)");
        assert_eq!(placeholder_group(3), "(?,?,?)");
    }
}
