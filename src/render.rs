//! Page rendering
//!
//! Templates are compiled into the binary and loaded once at startup.

use crate::models::group_thousands;
use minijinja::{Environment, Value};
use serde::Serialize;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    ("home.html", include_str!("../templates/home.html")),
    ("fleet.html", include_str!("../templates/fleet.html")),
    ("spacecraft.html", include_str!("../templates/spacecraft.html")),
    ("construction.html", include_str!("../templates/construction.html")),
    ("planets.html", include_str!("../templates/planets.html")),
    ("confirm.html", include_str!("../templates/confirm.html")),
];

/// Compiled page templates
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        env.add_filter("thousands", thousands);
        Ok(Self { env })
    }

    pub fn render(&self, name: &str, ctx: impl Serialize) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(ctx)
    }
}

/// Integers of any width, including the `u128` capacity totals
fn thousands(value: Value) -> String {
    group_thousands(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_all_templates_compile() {
        let templates = Templates::new().unwrap();
        for (name, _) in TEMPLATES {
            assert!(templates.env.get_template(name).is_ok(), "{name} missing");
        }
    }

    #[test]
    fn test_output_is_escaped() {
        let templates = Templates::new().unwrap();
        let html = templates
            .render(
                "confirm.html",
                context! { title => "Destroy", prompt => "<b>x</b>", action => "/", fields => Vec::<String>::new() },
            )
            .unwrap();

        assert!(html.contains("&lt;b&gt;x"));
        assert!(!html.contains("<b>x"));
    }

    #[test]
    fn test_thousands_filter() {
        let templates = Templates::new().unwrap();
        let out = templates.env.render_str("{{ 1234567 | thousands }}", ()).unwrap();

        assert_eq!(out, "1,234,567");

        let out = templates
            .env
            .render_str("{{ big | thousands }}", context! { big => u128::from(u64::MAX) * 2 })
            .unwrap();
        assert_eq!(out, "36,893,488,147,419,103,230");
    }
}
