/// Page rendering with Tera
use crate::domain::PageView;
use crate::errors::AppResult;
use tera::{Context, Tera};

const INDEX_TEMPLATE: &str = "index.html";

/// Compiled page templates, embedded at build time
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    pub fn new() -> AppResult<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html"]);
        tera.add_raw_template(INDEX_TEMPLATE, include_str!("../../templates/index.html"))?;
        Ok(Self { tera })
    }

    /// Render the index page for either a weather view or an error
    pub fn render_page(&self, page: &PageView) -> AppResult<String> {
        let mut ctx = Context::new();
        match page {
            PageView::Weather(view) => {
                ctx.insert("weather", &view.current);
                ctx.insert("uv_index", &view.uv_index);
                ctx.insert("air_quality", &view.air_quality);
                ctx.insert("forecast", &view.forecast);
                ctx.insert("forecast_source", &view.forecast_source);
                ctx.insert("current_date", &view.current_date);
                ctx.insert("current_time", &view.current_time);
            }
            PageView::Error(view) => {
                ctx.insert("error", &view.message);
            }
        }
        Ok(self.tera.render(INDEX_TEMPLATE, &ctx)?)
    }
}
