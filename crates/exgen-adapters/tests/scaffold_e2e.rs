//! End-to-end scaffolding against the built-in templates.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use exgen_adapters::{EmbeddedTemplates, LocalFilesystem, MemoryFilesystem, MiniJinjaRenderer};
use exgen_core::prelude::*;
use tempfile::TempDir;
use walkdir::WalkDir;

fn local_service() -> ScaffoldService {
    ScaffoldService::new(
        Box::new(EmbeddedTemplates::new()),
        Box::new(MiniJinjaRenderer::new()),
        Box::new(LocalFilesystem::new()),
    )
}

fn files_under(root: &Path) -> BTreeSet<String> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

fn read(root: &Path, path: &str) -> String {
    fs::read_to_string(root.join(path)).unwrap()
}

fn package_json(root: &Path) -> serde_json::Value {
    serde_json::from_str(&read(root, "package.json")).unwrap()
}

// ── javascript minimal api ───────────────────────────────────────────────────

#[test]
fn javascript_minimal_api() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("hello-world");
    let selection = Selection::builder()
        .language(LanguageVariant::JavaScript)
        .gitignore(true)
        .target_directory(&root)
        .build()
        .unwrap();

    local_service().scaffold(&selection).unwrap();

    let expected: BTreeSet<String> = [
        "server/app.js",
        "server/bin/www.js",
        "server/routes/index.js",
        "server/routes/users.js",
        "server/routes/hello.js",
        "server/controllers/userController.js",
        ".env",
        "package.json",
        ".eslintrc.js",
        ".babelrc",
        ".gitignore",
    ]
    .into_iter()
    .map(String::from)
    .collect();
    assert_eq!(files_under(&root), expected);

    let pkg = package_json(&root);
    assert_eq!(pkg["name"], "hello-world");
    assert!(pkg["dependencies"]["express"].is_string());
    for absent in ["mongoose", "sequelize", "redis"] {
        assert!(pkg["dependencies"].get(absent).is_none(), "{absent}");
    }

    let app = read(&root, "server/app.js");
    let uses: Vec<_> = app
        .lines()
        .filter(|l| l.starts_with("app.use(") && !l.starts_with("app.use('"))
        .collect();
    assert_eq!(
        uses,
        [
            "app.use(logger('dev'));",
            "app.use(express.json());",
            "app.use(express.urlencoded({ extended: false }));",
            "app.use(cookieParser());",
            "app.use(helmet());",
            "app.use(cors());",
            "app.use(compression());",
        ]
    );
    assert!(app.contains("import * as routes from './routes';"));
    assert!(app.contains("app.use('/api', routes.hello);"));
    assert!(app.contains("app.use('/api/users', routes.users);"));
    assert!(!app.contains("mongoose"));

    assert_eq!(read(&root, ".env"), "PORT=3001\n");
    assert!(read(&root, "server/bin/www.js").contains("server.listen(port);"));
}

#[cfg(unix)]
#[test]
fn bootstrap_script_is_executable() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("api");
    let selection = Selection::builder()
        .language(LanguageVariant::TypeScript)
        .target_directory(&root)
        .build()
        .unwrap();
    local_service().scaffold(&selection).unwrap();

    let mode = fs::metadata(root.join("server/bin/www.ts"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o755);
}

// ── typescript postgres redis ────────────────────────────────────────────────

#[test]
fn typescript_postgres_redis() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("inventory");
    let selection = Selection::builder()
        .language(LanguageVariant::TypeScript)
        .database(Database::Relational(SqlEngine::Postgres))
        .unwrap()
        .cache(Cache::Redis)
        .project_name("inventory")
        .target_directory(&root)
        .build()
        .unwrap();

    local_service().scaffold(&selection).unwrap();
    let files = files_under(&root);

    let pkg = package_json(&root);
    for dep in ["pg", "pg-hstore", "redis", "sequelize"] {
        assert!(pkg["dependencies"][dep].is_string(), "{dep}");
    }
    assert!(pkg["dependencies"].get("mysql2").is_none());
    assert!(files.contains("tsconfig.json"));
    assert!(!files.contains(".babelrc"));
    assert!(files.contains("server/models/index.ts"));
    assert!(files.contains("server/models/User.ts"));
    assert!(files.contains("server/config/config.ts"));
    assert!(!files.contains("server/models/config.ts"));

    let www = read(&root, "server/bin/www.ts");
    assert!(www.contains("import db from '../models';"));
    assert!(www.contains("db.sync({ force: true })"));
    assert!(!www.contains("http.createServer"));

    let env = read(&root, ".env");
    assert!(env.contains("DIALECT=postgres"));
    assert!(env.contains("DB_PORT=5432"));
    assert!(env.contains("REDIS_PORT=6379\nREDIS_HOST=127.0.0.1"));

    let app = read(&root, "server/app.ts");
    assert!(app.contains("import redis from 'redis';"));
    assert!(app.contains("redis.createClient(redisPort, redisHost)"));
}

// ── other branches ────────────────────────────────────────────────────────────

#[test]
fn mongoose_ships_models_and_tests() {
    let fs = MemoryFilesystem::new();
    let service = ScaffoldService::new(
        Box::new(EmbeddedTemplates::new()),
        Box::new(MiniJinjaRenderer::new()),
        Box::new(fs.clone()),
    );
    let selection = Selection::builder()
        .language(LanguageVariant::JavaScript)
        .database(Database::DocOdm)
        .unwrap()
        .project_name("shop")
        .build()
        .unwrap();

    let report = service.scaffold(&selection).unwrap();
    let files = fs.files_under(Path::new("shop"));

    for path in [
        "server/models/User.js",
        "server/models/index.js",
        "tests/routes/hello.spec.js",
        "tests/routes/users.spec.js",
        "jest.config.js",
    ] {
        assert!(files.contains(&PathBuf::from(path)), "{path}");
    }
    assert_eq!(report.file_count(), files.len());

    let app = fs.read_file(Path::new("shop/server/app.js")).unwrap();
    assert!(app.contains("import mongoose from 'mongoose';"));
    assert!(app.contains("mongoose.connect(mongoUri, mongooseConfigs);"));
}

#[test]
fn view_engine_copies_views_and_stylesheet() {
    let fs = MemoryFilesystem::new();
    let service = ScaffoldService::new(
        Box::new(EmbeddedTemplates::new()),
        Box::new(MiniJinjaRenderer::new()),
        Box::new(fs.clone()),
    );
    let selection = Selection::builder()
        .language(LanguageVariant::JavaScript)
        .view_engine(ViewEngine::Pug)
        .project_name("site")
        .build()
        .unwrap();

    service.scaffold(&selection).unwrap();
    let files = fs.files_under(Path::new("site"));

    for path in [
        "server/views/index.pug",
        "server/views/error.pug",
        "server/views/layout.pug",
        "public/stylesheets/style.css",
    ] {
        assert!(files.contains(&PathBuf::from(path)), "{path}");
    }
    let app = fs.read_file(Path::new("site/server/app.js")).unwrap();
    assert!(app.contains("app.set('view engine', 'pug');"));
    assert!(app.contains("next(createError(404));"));
}

#[test]
fn package_json_is_byte_identical_across_runs() {
    let tmp = TempDir::new().unwrap();
    let mut outputs = Vec::new();

    for name in ["first", "second"] {
        let selection = Selection::builder()
            .language(LanguageVariant::TypeScript)
            .database(Database::DocOdm)
            .unwrap()
            .cache(Cache::Redis)
            .project_name("same")
            .target_directory(tmp.path().join(name))
            .build()
            .unwrap();
        local_service().scaffold(&selection).unwrap();
        outputs.push(fs::read(tmp.path().join(name).join("package.json")).unwrap());
    }

    assert_eq!(outputs[0], outputs[1]);
    assert!(outputs[0].ends_with(b"}\n"));
}

#[test]
fn pre_existing_content_is_detected_and_cleared() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("busy");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("notes.txt"), "keep?").unwrap();

    let service = local_service();
    assert!(service.target_has_content(&root).unwrap());
    service.clear_target(&root).unwrap();
    assert!(!root.exists());

    let selection = Selection::builder()
        .language(LanguageVariant::JavaScript)
        .target_directory(&root)
        .build()
        .unwrap();
    service.scaffold(&selection).unwrap();
    assert!(!root.join("notes.txt").exists());
    assert!(root.join("package.json").exists());
}
