use std::sync::Arc;

use anyhow::Context;
use folio_di::Build;
use folio_templates_contracts::{
    RenderedTemplate, Template, TemplateService, BASE_TEMPLATE, TEMPLATES,
};
use tera::Tera;

#[derive(Debug, Clone, Build)]
pub struct TemplateServiceImpl {
    #[state]
    state: State,
}

#[derive(Debug, Clone)]
struct State(Arc<Tera>);

impl Default for State {
    fn default() -> Self {
        let mut tera = Tera::default();

        let names = TEMPLATES
            .iter()
            .map(|&(name, _, _)| (format!("{name}.html"), format!("{name}.txt")))
            .collect::<Vec<_>>();

        let sources = std::iter::once(("base.html", BASE_TEMPLATE)).chain(
            TEMPLATES
                .iter()
                .zip(&names)
                .flat_map(|(&(_, html, text), (html_name, text_name))| {
                    [(html_name.as_str(), html), (text_name.as_str(), text)]
                }),
        );

        tera.add_raw_templates(sources).unwrap();

        Self(tera.into())
    }
}

impl TemplateService for TemplateServiceImpl {
    fn render<T: Template>(&self, template: &T) -> anyhow::Result<RenderedTemplate> {
        let context = tera::Context::from_serialize(template)?;
        let render = |suffix: &str| {
            self.state
                .0
                .render(&format!("{}.{suffix}", T::NAME), &context)
                .with_context(|| format!("Failed to render {}.{suffix}", T::NAME))
        };

        Ok(RenderedTemplate {
            text: render("txt")?,
            html: render("html")?,
        })
    }
}
