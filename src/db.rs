use anyhow::Result;
use rusqlite::Connection;

use crate::parser::results::ParsedResult;

const DB_PATH: &str = "data/serps.sqlite";

pub fn connect() -> Result<Connection> {
    std::fs::create_dir_all("data")?;
    let conn = Connection::open(DB_PATH)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS serps (
            id          INTEGER PRIMARY KEY,
            serp_id     TEXT UNIQUE NOT NULL,
            crawl_id    TEXT,
            file        TEXT,
            html        TEXT NOT NULL,
            parsed      BOOLEAN NOT NULL DEFAULT 0,
            parsed_at   TEXT,
            error       TEXT,
            imported_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE INDEX IF NOT EXISTS idx_serps_parsed ON serps(parsed);

        CREATE TABLE IF NOT EXISTS results (
            id        INTEGER PRIMARY KEY,
            serp_id   TEXT NOT NULL,
            crawl_id  TEXT,
            type      TEXT NOT NULL,
            sub_type  TEXT,
            cmpt_rank INTEGER NOT NULL,
            sub_rank  INTEGER NOT NULL,
            serp_rank INTEGER NOT NULL,
            title     TEXT,
            url       TEXT,
            text      TEXT,
            cite      TEXT,
            error     TEXT,
            saved_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE INDEX IF NOT EXISTS idx_results_serp ON results(serp_id);
        CREATE INDEX IF NOT EXISTS idx_results_type ON results(type);
        ",
    )?;
    Ok(())
}

// ── Import ──

pub fn insert_serps(
    conn: &Connection,
    pages: &[(String, Option<String>, String, String)], // (serp_id, crawl_id, file, html)
) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut count = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT OR IGNORE INTO serps (serp_id, crawl_id, file, html) VALUES (?1, ?2, ?3, ?4)",
        )?;
        for (serp_id, crawl_id, file, html) in pages {
            count += stmt.execute(rusqlite::params![serp_id, crawl_id, file, html])?;
        }
    }
    tx.commit()?;
    Ok(count)
}

// ── Parsing ──

pub struct SerpPage {
    pub id: i64,
    pub serp_id: String,
    pub crawl_id: Option<String>,
    pub html: String,
}

pub fn fetch_unparsed(conn: &Connection, limit: Option<usize>) -> Result<Vec<SerpPage>> {
    let sql = format!(
        "SELECT id, serp_id, crawl_id, html FROM serps WHERE parsed = 0 ORDER BY id{}",
        match limit {
            Some(n) => format!(" LIMIT {}", n),
            None => String::new(),
        }
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(SerpPage {
                id: row.get(0)?,
                serp_id: row.get(1)?,
                crawl_id: row.get(2)?,
                html: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn save_results(conn: &Connection, results: &[ParsedResult]) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO results
             (serp_id, crawl_id, type, sub_type, cmpt_rank, sub_rank, serp_rank,
              title, url, text, cite, error)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        )?;
        for r in results {
            stmt.execute(rusqlite::params![
                r.serp_id,
                r.crawl_id,
                r.cmpt_type,
                r.sub_type,
                r.cmpt_rank,
                r.sub_rank,
                r.serp_rank,
                r.title,
                r.url,
                r.text,
                r.cite,
                r.error,
            ])?;
        }
    }
    tx.commit()?;
    Ok(())
}

pub fn mark_parsed(conn: &Connection, ids: &[i64]) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    {
        let mut stmt =
            tx.prepare("UPDATE serps SET parsed = 1, parsed_at = datetime('now') WHERE id = ?1")?;
        for id in ids {
            stmt.execute(rusqlite::params![id])?;
        }
    }
    tx.commit()?;
    Ok(())
}

pub fn mark_error(conn: &Connection, id: i64, error: &str) -> Result<()> {
    conn.execute(
        "UPDATE serps SET parsed = 1, parsed_at = datetime('now'), error = ?2 WHERE id = ?1",
        rusqlite::params![id, error],
    )?;
    Ok(())
}

// ── Export ──

pub fn fetch_results(conn: &Connection, limit: Option<usize>) -> Result<Vec<ParsedResult>> {
    let sql = format!(
        "SELECT serp_id, crawl_id, type, sub_type, cmpt_rank, sub_rank, serp_rank,
                title, url, text, cite, error
         FROM results ORDER BY serp_id, serp_rank{}",
        match limit {
            Some(n) => format!(" LIMIT {}", n),
            None => String::new(),
        }
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(ParsedResult {
                serp_id: row.get(0)?,
                crawl_id: row.get(1)?,
                cmpt_type: row.get(2)?,
                sub_type: row.get(3)?,
                cmpt_rank: row.get::<_, i64>(4)? as usize,
                sub_rank: row.get::<_, i64>(5)? as usize,
                serp_rank: row.get::<_, i64>(6)? as usize,
                title: row.get(7)?,
                url: row.get(8)?,
                text: row.get(9)?,
                cite: row.get(10)?,
                error: row.get(11)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

// ── Stats ──

pub struct Stats {
    pub total: usize,
    pub parsed: usize,
    pub unparsed: usize,
    pub errors: usize,
    pub results: usize,
}

pub fn get_stats(conn: &Connection) -> Result<Stats> {
    let total: usize = conn.query_row("SELECT COUNT(*) FROM serps", [], |r| r.get(0))?;
    let parsed: usize =
        conn.query_row("SELECT COUNT(*) FROM serps WHERE parsed = 1", [], |r| r.get(0))?;
    let errors: usize = conn.query_row(
        "SELECT COUNT(*) FROM serps WHERE error IS NOT NULL",
        [],
        |r| r.get(0),
    )?;
    let results: usize = conn.query_row("SELECT COUNT(*) FROM results", [], |r| r.get(0))?;
    Ok(Stats {
        total,
        parsed,
        unparsed: total - parsed,
        errors,
        results,
    })
}
