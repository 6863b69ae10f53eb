//! Turns a [`Selection`] into a [`ScaffoldPlan`].
//!
//! Planning is a pure function: the same selection always yields the same
//! steps in the same order. Feature branches contribute to three template
//! models (application entry, server bootstrap, environment file) which are
//! rendered by the last steps of the plan.

use crate::domain::{
    capabilities,
    defaults::{apply_default_middleware_set, apply_default_route_set},
    entities::{
        common::RelativePath,
        scaffold_plan::{PlanStep, ScaffoldPlan},
        selection::Selection,
        template_model::{SLOT_CACHE, SLOT_DB, SLOT_VIEW, Slot, TemplateId, TemplateModel},
    },
    error::DomainError,
    manifest::ManifestBuilder,
    snippets,
    value_objects::{Cache, Database, LanguageVariant},
};

const ROUTE_FILES: [&str; 3] = ["users", "index", "hello"];
const PUBLIC_DIRS: [&str; 4] = [
    "public",
    "public/javascripts",
    "public/images",
    "public/stylesheets",
];

/// Build the full plan for a selection.
pub fn plan_scaffold(selection: &Selection) -> Result<ScaffoldPlan, DomainError> {
    Planner::new(selection).build()
}

struct Planner<'a> {
    selection: &'a Selection,
    ext: &'static str,
    plan: ScaffoldPlan,
    app: TemplateModel,
    www: TemplateModel,
    env: TemplateModel,
}

impl<'a> Planner<'a> {
    fn new(selection: &'a Selection) -> Self {
        let mut app = TemplateModel::new(TemplateId::ApplicationEntry);
        apply_default_middleware_set(&mut app);
        apply_default_route_set(&mut app);

        Self {
            selection,
            ext: selection.language().ext(),
            plan: ScaffoldPlan::new(selection.target_directory()),
            app,
            www: TemplateModel::new(TemplateId::ServerBootstrap),
            env: TemplateModel::new(TemplateId::EnvironmentFile),
        }
    }

    fn build(mut self) -> Result<ScaffoldPlan, DomainError> {
        if !self.selection.targets_current_dir() {
            self.plan.push(PlanStep::CreateRoot);
        }

        self.routes()?;
        self.database()?;
        self.cache();
        self.gitignore()?;
        self.views()?;
        self.core_files()?;

        self.plan.validate()?;
        Ok(self.plan)
    }

    // ── branches ──────────────────────────────────────────────────────────

    fn routes(&mut self) -> Result<(), DomainError> {
        let ext = self.ext;
        self.mkdir("server/routes")?;
        for name in ROUTE_FILES {
            self.copy(
                format!("{ext}/routes/{name}.{ext}"),
                format!("server/routes/{name}.{ext}"),
            )?;
        }
        Ok(())
    }

    fn database(&mut self) -> Result<(), DomainError> {
        let ext = self.ext;
        let language = self.selection.language();
        self.mkdir("server/controllers")?;

        match self.selection.database() {
            Database::None => self.controller("default"),
            // Never offered for TypeScript; fall back to the plain controller.
            Database::DocDriver if language.is_typed() => self.controller("default"),
            Database::DocDriver => {
                self.app
                    .register_module("mongojs", "mongojs")
                    .set_slot(SLOT_DB, Slot::code(snippets::MONGOJS_CONNECT));
                self.controller("default")
            }
            Database::Relational(engine) => {
                self.mkdir("server/config")?;
                self.copy_group(format!("{ext}/models/sequelize/config"), "server/config")?;
                self.mkdir("server/models")?;
                self.copy_group(format!("{ext}/models/sequelize"), "server/models")?;
                self.controller("sql")?;

                self.www
                    .register_local_module("db", "../models")
                    .set_slot(SLOT_DB, Slot::code(snippets::sequelize_sync(language)));
                self.env
                    .set_slot(SLOT_DB, Slot::code(snippets::sequelize_env(engine)));
                Ok(())
            }
            Database::DocOdm => {
                self.app
                    .register_module("mongoose", "mongoose")
                    .set_slot(SLOT_DB, Slot::code(snippets::MONGOOSE_CONNECT));
                self.mkdir("server/models")?;
                self.copy_group(format!("{ext}/models/mongoose"), "server/models")?;
                self.controller("mongo")?;
                self.test_fixtures()
            }
        }
    }

    fn test_fixtures(&mut self) -> Result<(), DomainError> {
        let ext = self.ext;
        self.mkdir("tests/routes")?;
        for name in ["hello", "users"] {
            self.copy(
                format!("{ext}/testFiles/mongo/{name}.{ext}"),
                format!("tests/routes/{name}.spec.{ext}"),
            )?;
        }
        self.copy(format!("{ext}/jestConfig.js"), "jest.config.js")
    }

    fn cache(&mut self) {
        match self.selection.cache() {
            Cache::None => {}
            Cache::Redis => {
                self.app
                    .register_module("redis", "redis")
                    .set_slot(SLOT_CACHE, Slot::code(snippets::REDIS_CLIENT));
                self.env
                    .set_slot(SLOT_CACHE, Slot::code(snippets::REDIS_ENV));
            }
        }
    }

    fn gitignore(&mut self) -> Result<(), DomainError> {
        if self.selection.include_gitignore() {
            let ext = self.ext;
            self.copy(format!("{ext}/gitignore"), ".gitignore")?;
        }
        Ok(())
    }

    fn views(&mut self) -> Result<(), DomainError> {
        let Some(def) = capabilities::find_view_engine(self.selection.view_engine()) else {
            return Ok(());
        };

        for dir in PUBLIC_DIRS {
            self.mkdir(dir)?;
        }
        self.mkdir("server/views")?;
        self.plan.push(PlanStep::CopyTemplateGroup {
            from_dir: format!("views/{}", def.ext),
            to_dir: RelativePath::try_new("server/views")?,
            glob: format!("*.{}", def.ext),
        });
        self.copy("css/style.css", "public/stylesheets/style.css")?;

        self.app
            .register_module("path", "path")
            .register_module("createError", "http-errors")
            .set_slot(SLOT_VIEW, Slot::code(snippets::view_setup(def.ext)));
        Ok(())
    }

    fn core_files(&mut self) -> Result<(), DomainError> {
        let ext = self.ext;
        let language = self.selection.language();

        match language {
            LanguageVariant::TypeScript => self.copy("ts/tsconfig.json", "tsconfig.json")?,
            LanguageVariant::JavaScript => self.copy("js/babelrc", ".babelrc")?,
        }
        self.mkdir("server/bin")?;
        self.copy(format!("{ext}/eslintrc.js"), ".eslintrc.js")?;

        self.plan.push(PlanStep::WriteManifest {
            manifest: Box::new(ManifestBuilder::for_selection(self.selection)),
            to: RelativePath::try_new("package.json")?,
        });

        let models = [self.app.clone(), self.www.clone(), self.env.clone()];
        for model in models {
            let id = model.id();
            self.plan.push(PlanStep::Render {
                template: id.template_path(language),
                to: RelativePath::try_new(id.destination(language))?,
                permissions: id.permissions(),
                model: Box::new(model),
            });
        }
        Ok(())
    }

    // ── helpers ───────────────────────────────────────────────────────────

    fn mkdir(&mut self, dir: &str) -> Result<(), DomainError> {
        self.plan
            .push(PlanStep::CreateDir(RelativePath::try_new(dir)?));
        Ok(())
    }

    fn copy(&mut self, from: impl Into<String>, to: impl Into<String>) -> Result<(), DomainError> {
        self.plan.push(PlanStep::CopyTemplate {
            from: from.into(),
            to: RelativePath::try_new(to.into())?,
        });
        Ok(())
    }

    fn copy_group(&mut self, from_dir: String, to_dir: &str) -> Result<(), DomainError> {
        let glob = format!("*.{}", self.ext);
        self.plan.push(PlanStep::CopyTemplateGroup {
            from_dir,
            to_dir: RelativePath::try_new(to_dir)?,
            glob,
        });
        Ok(())
    }

    fn controller(&mut self, flavour: &str) -> Result<(), DomainError> {
        let ext = self.ext;
        self.copy(
            format!("{ext}/controllers/userController.{flavour}.{ext}"),
            format!("server/controllers/userController.{ext}"),
        )
    }
}
