use crate::domain::entities::scroll::Scroll;
use crate::domain::error::RetrievalError;
use crate::domain::ports::scroll_store::{ScrollHit, ScrollStore};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::sync::Mutex;

/// Brute-force cosine-distance store over a SQLite table. Fine for the small
/// scroll collections this serves; no index structure.
pub struct SqliteScrollStore {
    conn: Mutex<Connection>,
}

impl SqliteScrollStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn: Mutex::new(conn) }
    }

    fn cosine_distance(a: &[f32], b: &[f32]) -> f64 {
        // Cosine distance lives in [0, 2]. A stored vector whose length
        // disagrees with the query (stale row from a model change) must rank
        // below every comparable vector, so it gets infinity, not a
        // mid-scale value.
        if a.len() != b.len() || a.is_empty() {
            return f64::INFINITY;
        }
        let mut dot = 0.0_f64;
        let mut norm_a = 0.0_f64;
        let mut norm_b = 0.0_f64;
        for (x, y) in a.iter().zip(b.iter()) {
            let x = *x as f64;
            let y = *y as f64;
            dot += x * y;
            norm_a += x * x;
            norm_b += y * y;
        }
        let denom = norm_a.sqrt() * norm_b.sqrt();
        if denom == 0.0 {
            1.0
        } else {
            1.0 - dot / denom
        }
    }

    fn serialize_vector(v: &[f32]) -> Vec<u8> {
        v.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    fn deserialize_vector(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect()
    }
}

impl ScrollStore for SqliteScrollStore {
    fn insert(&self, scroll: &Scroll, vector: &[f32]) -> Result<(), RetrievalError> {
        let conn = self.conn.lock().map_err(|e| RetrievalError::Store(e.to_string()))?;
        conn.execute(
            "INSERT INTO scrolls (id, content, created_at) VALUES (?1, ?2, ?3)",
            params![scroll.id, scroll.content, scroll.created_at.to_rfc3339()],
        )
        .map_err(|e| RetrievalError::Store(format!("Failed to insert scroll: {e}")))?;
        conn.execute(
            "INSERT OR REPLACE INTO vectors (id, vector) VALUES (?1, ?2)",
            params![scroll.id, Self::serialize_vector(vector)],
        )
        .map_err(|e| RetrievalError::Store(format!("Failed to store vector: {e}")))?;
        Ok(())
    }

    fn search(&self, vector: &[f32], k: usize) -> Result<Vec<ScrollHit>, RetrievalError> {
        if k == 0 {
            return Err(RetrievalError::InvalidInput("k must be >= 1".into()));
        }

        let conn = self.conn.lock().map_err(|e| RetrievalError::Store(e.to_string()))?;
        let mut stmt = conn
            .prepare("SELECT s.id, s.content, v.vector FROM scrolls s JOIN vectors v ON v.id = s.id")
            .map_err(|e| RetrievalError::Store(e.to_string()))?;

        let rows: Vec<(String, String, Vec<u8>)> = stmt
            .query_map([], |row| {
                let id: String = row.get(0)?;
                let content: String = row.get(1)?;
                let blob: Vec<u8> = row.get(2)?;
                Ok((id, content, blob))
            })
            .map_err(|e| RetrievalError::Store(e.to_string()))?
            .collect::<Result<_, _>>()
            .map_err(|e| RetrievalError::Store(format!("Malformed row: {e}")))?;

        let mut scored: Vec<(f64, String, String)> = rows
            .into_iter()
            .map(|(id, content, blob)| {
                let stored = Self::deserialize_vector(&blob);
                (Self::cosine_distance(vector, &stored), id, content)
            })
            .collect();

        // Ascending distance; equal distances order by scroll id so results
        // are stable across runs.
        scored.sort_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.1.cmp(&b.1))
        });
        scored.truncate(k);

        Ok(scored
            .into_iter()
            .map(|(distance, _, content)| ScrollHit { content, distance })
            .collect())
    }

    fn scrolls_missing_vectors(&self) -> Result<Vec<Scroll>, RetrievalError> {
        let conn = self.conn.lock().map_err(|e| RetrievalError::Store(e.to_string()))?;
        let mut stmt = conn
            .prepare(
                "SELECT s.id, s.content, s.created_at FROM scrolls s
                 LEFT JOIN vectors v ON v.id = s.id WHERE v.id IS NULL",
            )
            .map_err(|e| RetrievalError::Store(e.to_string()))?;

        let rows: Vec<(String, String, String)> = stmt
            .query_map([], |row| {
                let id: String = row.get(0)?;
                let content: String = row.get(1)?;
                let created_at: String = row.get(2)?;
                Ok((id, content, created_at))
            })
            .map_err(|e| RetrievalError::Store(e.to_string()))?
            .collect::<Result<_, _>>()
            .map_err(|e| RetrievalError::Store(format!("Malformed row: {e}")))?;

        let mut scrolls = Vec::with_capacity(rows.len());
        for (id, content, created_at) in rows {
            let created_at = DateTime::parse_from_rfc3339(&created_at)
                .map_err(|e| {
                    RetrievalError::Store(format!("Malformed timestamp on scroll {id}: {e}"))
                })?
                .with_timezone(&Utc);
            scrolls.push(Scroll { id, content, created_at });
        }

        Ok(scrolls)
    }

    fn store_vector(&self, id: &str, vector: &[f32]) -> Result<(), RetrievalError> {
        let conn = self.conn.lock().map_err(|e| RetrievalError::Store(e.to_string()))?;
        conn.execute(
            "INSERT OR REPLACE INTO vectors (id, vector) VALUES (?1, ?2)",
            params![id, Self::serialize_vector(vector)],
        )
        .map_err(|e| RetrievalError::Store(format!("Failed to store vector: {e}")))?;
        Ok(())
    }

    fn count(&self) -> Result<usize, RetrievalError> {
        let conn = self.conn.lock().map_err(|e| RetrievalError::Store(e.to_string()))?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM scrolls", [], |r| r.get(0))
            .map_err(|e| RetrievalError::Store(e.to_string()))?;
        Ok(count as usize)
    }
}
