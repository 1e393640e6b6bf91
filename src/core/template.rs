use crate::domain::model::TemplateData;
use crate::utils::error::Result;
use handlebars::Handlebars;

/// Renders a Handlebars template against the bulletin data.
///
/// `{{KEY}}` is HTML-escaped, `{{{KEY}}}` is inserted raw, and list values such
/// as `HYMNS` can be walked with `{{#each HYMNS}}{{this}}{{/each}}`.
pub fn render_template(source: &str, data: &TemplateData) -> Result<String> {
    let handlebars = Handlebars::new();
    let rendered = handlebars.render_template(source, data)?;
    tracing::debug!("Rendered template ({} bytes)", rendered.len());
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::LiturgistError;
    use serde_json::json;

    fn data(value: serde_json::Value) -> TemplateData {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_render_simple_variable() {
        let rendered = render_template("Hello {{name}}!", &data(json!({"name": "World"}))).unwrap();
        assert_eq!(rendered, "Hello World!");
    }

    #[test]
    fn test_render_escapes_html() {
        let data = data(json!({"COLLECT": "Grace & peace <3"}));
        assert_eq!(render_template("{{COLLECT}}", &data).unwrap(), "Grace &amp; peace &lt;3");
        assert_eq!(render_template("{{{COLLECT}}}", &data).unwrap(), "Grace & peace <3");
    }

    #[test]
    fn test_render_hymn_list() {
        let data = data(json!({"HYMNS": ["Hymn 1", "Hymn 2"]}));
        let rendered = render_template("{{#each HYMNS}}<li>{{this}}</li>{{/each}}", &data).unwrap();
        assert_eq!(rendered, "<li>Hymn 1</li><li>Hymn 2</li>");
    }

    #[test]
    fn test_render_missing_key_is_empty() {
        let rendered = render_template("[{{SCRIPTURE_TEXT}}]", &TemplateData::new()).unwrap();
        assert_eq!(rendered, "[]");
    }

    #[test]
    fn test_render_invalid_template() {
        let err = render_template("{{#each HYMNS}}", &TemplateData::new()).unwrap_err();
        assert!(matches!(err, LiturgistError::TemplateError(_)));
    }
}
