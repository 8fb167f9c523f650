use serde::{Deserialize, Serialize};

/// Escapes the characters reserved by the HTML-like output markup.
///
/// Spans without any reserved character are copied verbatim.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlEncoder;

impl HtmlEncoder {
    #[inline]
    fn is_reserved(c: char) -> bool {
        matches!(c, '&' | '<' | '>' | '"')
    }

    /// Returns true if `chars` contains at least one reserved character.
    pub fn needs_encoding(chars: &[char]) -> bool {
        chars.iter().copied().any(HtmlEncoder::is_reserved)
    }

    /// Appends the escaped version of `chars` to `output`.
    pub fn encode_into(chars: &[char], output: &mut String) {
        if !HtmlEncoder::needs_encoding(chars) {
            output.extend(chars);
            return;
        }
        for &c in chars {
            match c {
                '&' => output.push_str("&amp;"),
                '<' => output.push_str("&lt;"),
                '>' => output.push_str("&gt;"),
                '"' => output.push_str("&quot;"),
                _ => output.push(c),
            }
        }
    }

    /// Reverses [`HtmlEncoder::encode_into`].
    pub fn decode(text: &str) -> String {
        if !text.contains('&') {
            return text.to_string();
        }
        let mut decoded = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(pos) = rest.find('&') {
            decoded.push_str(&rest[..pos]);
            rest = &rest[pos..];
            let (entity, c) = [("&amp;", '&'), ("&lt;", '<'), ("&gt;", '>'), ("&quot;", '"')]
                .into_iter()
                .find(|(entity, _)| rest.starts_with(entity))
                .unwrap_or(("&", '&'));
            decoded.push(c);
            rest = &rest[entity.len()..];
        }
        decoded.push_str(rest);
        decoded
    }
}

/// Wraps highlighted terms in a pair of tags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightFormatter {
    pre_tag: String,
    post_tag: String,
}

impl Default for HighlightFormatter {
    fn default() -> HighlightFormatter {
        HighlightFormatter::new("<b>", "</b>")
    }
}

impl HighlightFormatter {
    /// Creates a formatter wrapping terms between `pre_tag` and `post_tag`.
    pub fn new(pre_tag: &str, post_tag: &str) -> HighlightFormatter {
        HighlightFormatter {
            pre_tag: pre_tag.to_string(),
            post_tag: post_tag.to_string(),
        }
    }

    pub fn pre_tag(&self) -> &str {
        &self.pre_tag
    }

    pub fn post_tag(&self) -> &str {
        &self.post_tag
    }

    /// Appends the escaped, highlighted version of `chars` to `output`.
    pub fn highlight_into(&self, chars: &[char], output: &mut String) {
        output.push_str(&self.pre_tag);
        HtmlEncoder::encode_into(chars, output);
        output.push_str(&self.post_tag);
    }

    /// Removes the highlight tags from a rendered fragment and decodes it
    /// back to the original document text.
    ///
    /// The result is exact only if both tags contain a reserved character,
    /// as the default `<b>` and `</b>` do: escaped document text can then
    /// never contain a tag. With tags such as `[` and `]`, the same
    /// characters are also removed from the document text.
    pub fn strip(&self, rendered: &str) -> String {
        let untagged = rendered.replace(&self.pre_tag, "").replace(&self.post_tag, "");
        HtmlEncoder::decode(&untagged)
    }
}
