use std::collections::HashMap;

/// Literal multi-pattern find-and-replace over subject and body text.
///
/// The string is scanned once from the left. At each position the longest
/// matching key wins (ties broken lexicographically), its value is emitted
/// and scanning resumes after the key, so replaced text is never rescanned.
#[derive(Debug, Default)]
pub struct Replacer {
    pairs: Vec<(String, String)>,
}

impl Replacer {
    pub fn new(substitutions: &HashMap<String, String>) -> Self {
        // An empty key would match everywhere
        let mut pairs: Vec<(String, String)> = substitutions
            .iter()
            .filter(|(key, _)| !key.is_empty())
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        pairs.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));

        Self { pairs }
    }

    pub fn replace(&self, text: &str) -> String {
        if self.pairs.is_empty() {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(c) = rest.chars().next() {
            match self.pairs.iter().find(|(key, _)| rest.starts_with(key.as_str())) {
                Some((key, value)) => {
                    out.push_str(value);
                    rest = &rest[key.len()..];
                }
                None => {
                    out.push(c);
                    rest = &rest[c.len_utf8()..];
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn replacer(pairs: &[(&str, &str)]) -> Replacer {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Replacer::new(&map)
    }

    #[test]
    fn empty_table_is_identity() {
        let r = Replacer::new(&HashMap::new());
        assert_eq!(r.replace("hi {{name}} ✓"), "hi {{name}} ✓");
    }

    #[test]
    fn replaces_every_occurrence() {
        let r = replacer(&[("{{name}}", "Bob"), ("-city-", "Oslo")]);
        assert_eq!(
            r.replace("{{name}} from -city-, {{name}}!"),
            "Bob from Oslo, Bob!"
        );
    }

    #[test]
    fn replaced_text_is_not_rescanned() {
        let r = replacer(&[("a", "b"), ("b", "c")]);
        assert_eq!(r.replace("ab"), "bc");
    }

    #[test]
    fn longest_key_wins() {
        let r = replacer(&[("%n", "short"), ("%name%", "long")]);
        assert_eq!(r.replace("%name% %n"), "long short");
    }

    #[test]
    fn empty_key_is_ignored() {
        let r = replacer(&[("", "x"), ("k", "v")]);
        assert_eq!(r.replace("kk"), "vv");
    }

    #[test]
    fn second_pass_is_idempotent() {
        let r = replacer(&[("{{name}}", "Bob"), ("{{day}}", "Monday")]);
        let once = r.replace("Hi {{name}}, see you {{day}}");
        assert_eq!(r.replace(&once), once);
    }

    #[test]
    fn multibyte_text_around_keys() {
        let r = replacer(&[("%名前%", "ボブ")]);
        assert_eq!(r.replace("こんにちは%名前%さん"), "こんにちはボブさん");
    }
}
