/// HTML escaping for text inserted into the report
///
/// `&` is replaced first so the entities produced for the other four
/// characters are not escaped again.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_all_special_characters() {
        assert_eq!(escape_html(r#"&<>"'"#), "&amp;&lt;&gt;&quot;&#39;");
    }

    #[test]
    fn test_existing_entity_is_escaped_once() {
        assert_eq!(escape_html("Brighton &amp; Hove"), "Brighton &amp;amp; Hove");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(escape_html("Real Madrid"), "Real Madrid");
        assert_eq!(escape_html(""), "");
    }
}
