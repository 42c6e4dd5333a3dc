//! SQL schema for the Vantage SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- No UPDATE or DELETE is ever issued against any table.
-- `id` is assigned as MAX(id) + 1, so ORDER BY id is insertion order.
CREATE TABLE IF NOT EXISTS competitors (
    id             INTEGER PRIMARY KEY,
    name           TEXT NOT NULL,
    website_url    TEXT,
    twitter_url    TEXT,
    instagram_url  TEXT,
    facebook_url   TEXT,
    reddit_url     TEXT,
    discord_url    TEXT,
    industry       TEXT,
    description    TEXT,
    logo_url       TEXT,
    status         TEXT NOT NULL DEFAULT 'active',
    created_at     TEXT NOT NULL,   -- RFC 3339 UTC; server-assigned
    updated_at     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS research_results (
    id          INTEGER PRIMARY KEY,
    created_at  TEXT NOT NULL,
    data_json   TEXT NOT NULL       -- verbatim payload
);

-- Ids are opaque strings; `seq` carries insertion order.
CREATE TABLE IF NOT EXISTS social_content (
    seq           INTEGER PRIMARY KEY AUTOINCREMENT,
    id            TEXT NOT NULL UNIQUE,
    analysis_id   TEXT NOT NULL,
    content_json  TEXT NOT NULL,
    source        TEXT,
    created_at    TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS competitors_status_idx     ON competitors(status);
CREATE INDEX IF NOT EXISTS social_content_analysis_idx ON social_content(analysis_id);

PRAGMA user_version = 1;
";
