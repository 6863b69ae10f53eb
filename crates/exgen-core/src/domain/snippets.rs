//! Code fragments spliced into template slots.
//!
//! Fragments are inserted verbatim; indentation inside them is final.

use crate::domain::value_objects::{LanguageVariant, SqlEngine};

/// Connection setup for the bare `mongojs` driver (application entry).
pub const MONGOJS_CONNECT: &str = "\
const dbUri = process.env.MONGODB_URI || 'mydb';
const collections = ['mycollection'];

// eslint-disable-next-line
const db = mongojs(dbUri, collections);";

/// Connection setup for `mongoose` (application entry).
pub const MONGOOSE_CONNECT: &str = "\
const mongoUri = process.env.MONGODB_URI || 'mongodb://localhost/mydb';
const mongooseConfigs = { useNewUrlParser: true, useUnifiedTopology: true };
mongoose.connect(mongoUri, mongooseConfigs);";

const SEQUELIZE_SYNC_JS: &str = "\
// Run sequelize before listen
db.sequelize.sync({ force: true }).then(() => {
  app.listen(port, () => {
    console.log(`App listening on PORT ${port}`);
  });
});";

const SEQUELIZE_SYNC_TS: &str = "\
// Run sequelize before listen
db.sync({ force: true }).then(() => {
  app.listen(port, () => {
    console.log(`App listening on PORT ${port}`);
  });
});";

/// Sync-then-listen block for the server bootstrap. The JavaScript models
/// barrel exposes `db.sequelize`; the TypeScript one exports the instance.
pub const fn sequelize_sync(language: LanguageVariant) -> &'static str {
    match language {
        LanguageVariant::JavaScript => SEQUELIZE_SYNC_JS,
        LanguageVariant::TypeScript => SEQUELIZE_SYNC_TS,
    }
}

/// Credential variables for `.env`, including the dialect tag.
pub fn sequelize_env(engine: SqlEngine) -> String {
    format!(
        "USERNAME=root\n\
         PASSWORD=null\n\
         DATABASE=database_dev\n\
         HOST=127.0.0.1\n\
         DB_PORT={}\n\
         DIALECT={}",
        engine.default_port(),
        engine.dialect()
    )
}

/// Redis client setup (application entry).
pub const REDIS_CLIENT: &str = "\
/**
* Redis Setup. For more options for redis client, go to: https://www.npmjs.com/package/redis#options-object-properties
*/
const redisPort = parseInt(process.env.REDIS_PORT) || 6379;
const redisHost = process.env.REDIS_HOST || '127.0.0.1';
const redisClient = redis.createClient(redisPort, redisHost);

redisClient.on('error', (error) => {
  console.error(error);
  console.log('\\x1b[33m%s\\x1b[0m', 'Make sure redis is installed and running.');
});

redisClient.on('connect', () => {
  console.log(`Redis connected in port: ${redisPort}`);
});
// --------------End of Redis Setup-----------------------";

/// Redis connection variables for `.env`.
pub const REDIS_ENV: &str = "REDIS_PORT=6379\nREDIS_HOST=127.0.0.1";

/// View engine wiring for the application entry. `__dirname` resolves to
/// `server/` in both source and transpiled output.
pub fn view_setup(engine: &str) -> String {
    format!(
        "// view engine setup\n\
         app.set('views', path.join(__dirname, 'views'));\n\
         app.set('view engine', '{engine}');\n\
         app.use(express.static(path.join(__dirname, '..', 'public')));"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequelize_env_carries_engine_port_and_dialect() {
        let env = sequelize_env(SqlEngine::Postgres);
        assert!(env.contains("DB_PORT=5432"));
        assert!(env.ends_with("DIALECT=postgres"));

        let env = sequelize_env(SqlEngine::MariaDb);
        assert!(env.contains("DB_PORT=3306"));
        assert!(env.ends_with("DIALECT=mariadb"));
    }

    #[test]
    fn typescript_sync_uses_exported_instance() {
        assert!(sequelize_sync(LanguageVariant::TypeScript).contains("db.sync("));
        assert!(sequelize_sync(LanguageVariant::JavaScript).contains("db.sequelize.sync("));
    }

    #[test]
    fn redis_snippet_keeps_escape_sequence_literal() {
        assert!(REDIS_CLIENT.contains(r"'\x1b[33m%s\x1b[0m'"));
    }

    #[test]
    fn view_setup_names_engine() {
        assert!(view_setup("pug").contains("app.set('view engine', 'pug');"));
    }
}
