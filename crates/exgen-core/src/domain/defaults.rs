//! Unconditional contributions to the application entry model.
//!
//! Every generated application gets the same middleware stack and the same
//! two API mounts, independent of the selection. They are applied to a plain
//! [`TemplateModel`] rather than baked into a special model type.

use crate::domain::entities::template_model::TemplateModel;

/// One default middleware: an optional import plus its `app.use` statements.
struct DefaultMiddleware {
    module: Option<(&'static str, &'static str)>,
    uses: &'static [&'static str],
}

/// Registration order is the order the generated app installs them.
const DEFAULT_MIDDLEWARE: &[DefaultMiddleware] = &[
    DefaultMiddleware {
        module: Some(("logger", "morgan")),
        uses: &["logger('dev')"],
    },
    DefaultMiddleware {
        module: None,
        uses: &["express.json()", "express.urlencoded({ extended: false })"],
    },
    DefaultMiddleware {
        module: Some(("cookieParser", "cookie-parser")),
        uses: &["cookieParser()"],
    },
    DefaultMiddleware {
        module: Some(("helmet", "helmet")),
        uses: &["helmet()"],
    },
    DefaultMiddleware {
        module: Some(("cors", "cors")),
        uses: &["cors()"],
    },
    DefaultMiddleware {
        module: Some(("compression", "compression")),
        uses: &["compression()"],
    },
];

/// Binding under which the routes barrel is imported.
pub const ROUTES_BINDING: &str = "* as routes";

/// Request logger, JSON body, URL-encoded body, cookies, security headers,
/// CORS, compression: five imports and seven `app.use` statements.
pub fn apply_default_middleware_set(model: &mut TemplateModel) {
    for middleware in DEFAULT_MIDDLEWARE {
        if let Some((binding, package)) = middleware.module {
            model.register_module(binding, package);
        }
        for statement in middleware.uses {
            model.register_middleware(*statement);
        }
    }
}

/// Import the routes barrel and mount the root API and users routers.
pub fn apply_default_route_set(model: &mut TemplateModel) {
    model
        .register_local_module(ROUTES_BINDING, "./routes")
        .register_route_mount("/api", "routes.hello")
        .register_route_mount("/api/users", "routes.users");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::template_model::TemplateId;

    #[test]
    fn middleware_set_is_seven_statements_in_order() {
        let mut model = TemplateModel::new(TemplateId::ApplicationEntry);
        apply_default_middleware_set(&mut model);

        assert_eq!(
            model.uses(),
            [
                "logger('dev')",
                "express.json()",
                "express.urlencoded({ extended: false })",
                "cookieParser()",
                "helmet()",
                "cors()",
                "compression()",
            ]
        );
        let bindings: Vec<_> = model.modules().collect();
        assert_eq!(
            bindings,
            [
                ("logger", "morgan"),
                ("cookieParser", "cookie-parser"),
                ("helmet", "helmet"),
                ("cors", "cors"),
                ("compression", "compression"),
            ]
        );
    }

    #[test]
    fn route_set_mounts_hello_before_users() {
        let mut model = TemplateModel::new(TemplateId::ApplicationEntry);
        apply_default_route_set(&mut model);

        assert_eq!(model.local_module(ROUTES_BINDING), Some("./routes"));
        let mounts: Vec<_> = model
            .mounts()
            .iter()
            .map(|m| (m.path.as_str(), m.code.as_str()))
            .collect();
        assert_eq!(
            mounts,
            [("/api", "routes.hello"), ("/api/users", "routes.users")]
        );
    }

    #[test]
    fn applying_twice_duplicates_statements_but_not_imports() {
        let mut model = TemplateModel::new(TemplateId::ApplicationEntry);
        apply_default_middleware_set(&mut model);
        apply_default_middleware_set(&mut model);

        assert_eq!(model.uses().len(), 14);
        assert_eq!(model.modules().count(), 5);
    }
}
