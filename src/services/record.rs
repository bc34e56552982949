//! Generic repository: list, get, create, update and delete for any resource schema.

use crate::config::UploadConfig;
use crate::error::{AppError, AppResult};
use crate::models::{ChildItems, GalleryMode, ImageSource, Record, Submission};
use crate::resources::{ChildCollection, ChildKind, Field, FileSlot, ListOrder, ResourceSchema};
use crate::services::children;
use crate::services::upload::{StoredFile, UploadService};
use crate::utils::strip_markup;
use chrono::{NaiveDateTime, SubsecRound, Utc};
use sea_orm::sea_query::{Alias, Expr, Order, Query, SelectStatement, SimpleExpr};
use sea_orm::{ConnectionTrait, DatabaseConnection, QueryResult, TransactionTrait};
use serde_json::Value;
use std::collections::HashMap;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

type Assignments = Vec<(&'static str, SimpleExpr)>;

fn db_value(value: impl Into<sea_orm::Value>) -> SimpleExpr {
    SimpleExpr::Value(value.into())
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(0)
}

fn statement_error(e: impl std::fmt::Debug) -> AppError {
    AppError::Internal(anyhow::anyhow!("Failed to build statement: {:?}", e))
}

pub struct RecordService {
    db: DatabaseConnection,
    uploads: UploadConfig,
    schema: &'static ResourceSchema,
}

impl RecordService {
    pub fn new(db: DatabaseConnection, uploads: UploadConfig, schema: &'static ResourceSchema) -> Self {
        Self { db, uploads, schema }
    }

    pub fn schema(&self) -> &'static ResourceSchema {
        self.schema
    }

    pub async fn list(&self) -> AppResult<Vec<Record>> {
        let mut select = self.select();
        match self.schema.order {
            ListOrder::Insertion => {
                select.order_by(Alias::new("id"), Order::Asc);
            }
            ListOrder::NewestFirst => {
                select
                    .order_by(Alias::new("created_at"), Order::Desc)
                    .order_by(Alias::new("id"), Order::Desc);
            }
        }

        let backend = self.db.get_database_backend();
        let rows = self.db.query_all(backend.build(&select)).await?;
        let mut records = rows
            .iter()
            .map(|row| self.decode(row))
            .collect::<AppResult<Vec<_>>>()?;
        self.attach_children(&mut records).await?;
        Ok(records)
    }

    pub async fn get(&self, id: i32) -> AppResult<Record> {
        self.find(id).await?.ok_or_else(|| self.schema.not_found())
    }

    pub async fn create(&self, submission: Submission) -> AppResult<Record> {
        self.validate_create(&submission)?;

        let mut written = Vec::new();
        match self.insert(&submission, &mut written).await {
            Ok(id) => {
                tracing::info!("Created {} {}", self.schema.key, id);
                self.get(id).await
            }
            Err(e) => {
                UploadService::remove_all(&self.uploads, written.iter().map(String::as_str)).await;
                Err(e)
            }
        }
    }

    pub async fn update(&self, id: i32, submission: Submission) -> AppResult<Record> {
        let current = self.get(id).await?;
        self.validate_update(&submission)?;

        let mut written = Vec::new();
        match self.rewrite(id, &current, &submission, &mut written).await {
            Ok(replaced) => {
                tracing::info!("Updated {} {}", self.schema.key, id);
                UploadService::remove_all(&self.uploads, replaced.iter().map(String::as_str)).await;
                self.get(id).await
            }
            Err(e) => {
                UploadService::remove_all(&self.uploads, written.iter().map(String::as_str)).await;
                Err(e)
            }
        }
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let current = self.find(id).await?;

        let txn = self.db.begin().await?;
        for collection in self.schema.children {
            children::delete_for_parent(&txn, collection, id).await?;
        }

        let delete = Query::delete()
            .from_table(Alias::new(self.schema.table))
            .and_where(Expr::col(Alias::new("id")).eq(id))
            .to_owned();
        let backend = txn.get_database_backend();
        let result = txn.execute(backend.build(&delete)).await?;

        if result.rows_affected() == 0 {
            txn.rollback().await?;
            return Err(self.schema.not_found());
        }
        txn.commit().await?;
        tracing::info!("Deleted {} {}", self.schema.key, id);

        if let Some(record) = current {
            let paths = self.stored_paths(&record);
            UploadService::remove_all(&self.uploads, paths.iter().map(String::as_str)).await;
        }
        Ok(())
    }

    // ---- validation ----

    fn validate_create(&self, submission: &Submission) -> AppResult<()> {
        let missing_field = self
            .schema
            .fields
            .iter()
            .filter(|f| f.required)
            .any(|f| submission.field(f.name).map_or(true, |v| is_blank(&clean(f, v))));
        let missing_file = self
            .schema
            .files
            .iter()
            .filter(|slot| slot.required)
            .any(|slot| !submission.files.get(slot.input).is_some_and(ImageSource::is_new));

        if missing_field || missing_file {
            return Err(AppError::missing_fields());
        }

        // A new record owns no stored files.
        if let Some(ImageSource::Existing(path)) =
            submission.files.values().find(|source| !source.is_new())
        {
            return Err(unknown_reference(path));
        }
        Ok(())
    }

    fn validate_update(&self, submission: &Submission) -> AppResult<()> {
        let blanked = self
            .schema
            .fields
            .iter()
            .filter(|f| f.required)
            .any(|f| submission.field(f.name).is_some_and(|v| is_blank(&clean(f, v))));

        if blanked {
            return Err(AppError::missing_fields());
        }
        Ok(())
    }

    // ---- writes ----

    async fn insert(&self, submission: &Submission, written: &mut Vec<String>) -> AppResult<i32> {
        let mut values: Assignments = Vec::new();
        for field in self.schema.fields {
            let value = match submission.field(field.name) {
                Some(v) if !is_blank(v) => Some(clean(field, v)),
                _ => field.default.map(str::to_string),
            };
            if let Some(value) = value {
                values.push((field.name, db_value(value)));
            }
        }

        for slot in self.schema.files {
            if let Some(source) = submission.files.get(slot.input) {
                let stored = self.ingest(source, slot.type_tag, written).await?;
                push_file_columns(&mut values, slot, &stored);
            }
        }

        let mut child_values = HashMap::new();
        for collection in self.schema.children {
            if let Some(items) = submission.children.get(collection.key) {
                let resolved = self.resolve_items(collection, items, &[], written).await?;
                child_values.insert(collection.key, resolved);
            }
        }

        let timestamp = now();
        values.push(("created_at", db_value(timestamp)));
        values.push(("updated_at", db_value(timestamp)));

        let (columns, exprs): (Vec<_>, Vec<_>) = values.into_iter().unzip();
        let mut insert = Query::insert();
        insert
            .into_table(Alias::new(self.schema.table))
            .columns(columns.into_iter().map(Alias::new));
        insert.values(exprs).map_err(statement_error)?;

        let txn = self.db.begin().await?;
        let backend = txn.get_database_backend();
        let result = txn.execute(backend.build(&insert)).await?;
        let id = i32::try_from(result.last_insert_id())
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Generated id out of range")))?;

        for collection in self.schema.children {
            if let Some(items) = child_values.get(collection.key) {
                children::replace_all(&txn, collection, id, items).await?;
            }
        }
        txn.commit().await?;

        Ok(id)
    }

    /// Apply a partial update. Returns the stored paths no longer referenced.
    async fn rewrite(
        &self,
        id: i32,
        current: &Record,
        submission: &Submission,
        written: &mut Vec<String>,
    ) -> AppResult<Vec<String>> {
        let mut values: Assignments = Vec::new();
        let mut replaced = Vec::new();

        for field in self.schema.fields {
            if let Some(v) = submission.field(field.name) {
                let value = if is_blank(v) {
                    field.default.unwrap_or_default().to_string()
                } else {
                    clean(field, v)
                };
                values.push((field.name, db_value(value)));
            }
        }

        for slot in self.schema.files {
            let Some(source) = submission.files.get(slot.input).filter(|s| s.is_new()) else {
                continue;
            };
            let stored = self.ingest(source, slot.type_tag, written).await?;
            push_file_columns(&mut values, slot, &stored);
            if let Some(old) = current.get(slot.column).and_then(Value::as_str) {
                replaced.push(old.to_string());
            }
        }

        let mut child_values = Vec::new();
        for collection in self.schema.children {
            let items = submission.children.get(collection.key);
            match collection.kind {
                ChildKind::Text => {
                    let resolved = match items {
                        Some(items) => self.resolve_items(collection, items, &[], written).await?,
                        None => Vec::new(),
                    };
                    child_values.push((collection, resolved));
                }
                ChildKind::Image { .. } => {
                    if !replaces_gallery(submission.gallery_mode, items) {
                        continue;
                    }
                    let held: Vec<String> = string_array(current.get(collection.key)).collect();
                    let resolved = match items {
                        Some(items) => self.resolve_items(collection, items, &held, written).await?,
                        None => Vec::new(),
                    };
                    replaced.extend(held.into_iter().filter(|old| !resolved.contains(old)));
                    child_values.push((collection, resolved));
                }
            }
        }

        values.push(("updated_at", db_value(now())));
        let update = Query::update()
            .table(Alias::new(self.schema.table))
            .values(values.into_iter().map(|(c, v)| (Alias::new(c), v)))
            .and_where(Expr::col(Alias::new("id")).eq(id))
            .to_owned();

        let txn = self.db.begin().await?;
        let backend = txn.get_database_backend();
        txn.execute(backend.build(&update)).await?;
        for (collection, items) in &child_values {
            children::replace_all(&txn, collection, id, items).await?;
        }
        txn.commit().await?;

        Ok(replaced)
    }

    async fn ingest(
        &self,
        source: &ImageSource,
        type_tag: &str,
        written: &mut Vec<String>,
    ) -> AppResult<StoredFile> {
        let stored = UploadService::ingest(&self.uploads, source, type_tag).await?;
        if stored.fresh {
            written.push(stored.path.clone());
        }
        Ok(stored)
    }

    /// Turn submitted child items into stored values. Image items may only
    /// reference paths in `held`, the collection's current entries.
    async fn resolve_items(
        &self,
        collection: &ChildCollection,
        items: &ChildItems,
        held: &[String],
        written: &mut Vec<String>,
    ) -> AppResult<Vec<String>> {
        match (items, collection.kind) {
            (ChildItems::Text(values), _) => Ok(values.clone()),
            (ChildItems::Images(sources), ChildKind::Image { type_tag }) => {
                if let Some(ImageSource::Existing(path)) = sources
                    .iter()
                    .find(|source| matches!(source, ImageSource::Existing(p) if !held.contains(p)))
                {
                    return Err(unknown_reference(path));
                }

                let mut paths = Vec::with_capacity(sources.len());
                for source in sources {
                    paths.push(self.ingest(source, type_tag, written).await?.path);
                }
                Ok(paths)
            }
            (ChildItems::Images(_), ChildKind::Text) => Err(AppError::Validation(format!(
                "'{}' expects plain values",
                collection.key
            ))),
        }
    }

    // ---- reads ----

    fn select(&self) -> SelectStatement {
        Query::select()
            .columns(self.schema.columns().into_iter().map(Alias::new))
            .from(Alias::new(self.schema.table))
            .to_owned()
    }

    async fn find(&self, id: i32) -> AppResult<Option<Record>> {
        let mut select = self.select();
        select.and_where(Expr::col(Alias::new("id")).eq(id));

        let backend = self.db.get_database_backend();
        let Some(row) = self.db.query_one(backend.build(&select)).await? else {
            return Ok(None);
        };

        let mut records = vec![self.decode(&row)?];
        self.attach_children(&mut records).await?;
        Ok(records.pop())
    }

    fn decode(&self, row: &QueryResult) -> AppResult<Record> {
        let mut record = Record::new();

        let id: i32 = row.try_get("", "id")?;
        record.insert("id".to_string(), Value::from(id));

        for field in self.schema.fields {
            let value: Option<String> = row.try_get("", field.name)?;
            record.insert(field.name.to_string(), Value::from(value));
        }

        for slot in self.schema.files {
            let path: Option<String> = row.try_get("", slot.column)?;
            let url = path
                .as_deref()
                .filter(|p| !p.is_empty())
                .map(|p| self.uploads.public_url(p));

            if let Some(column) = slot.name_column {
                let name: Option<String> = row.try_get("", column)?;
                record.insert(column.to_string(), Value::from(name));
            }
            if let Some(column) = slot.size_column {
                let size: Option<i64> = row.try_get("", column)?;
                record.insert(column.to_string(), Value::from(size));
            }
            record.insert(slot.column.to_string(), Value::from(path));
            record.insert(slot.url_key.to_string(), Value::from(url));
        }

        for column in ["created_at", "updated_at"] {
            let at: Option<NaiveDateTime> = row.try_get("", column)?;
            let formatted = at.map(|t| t.format(TIMESTAMP_FORMAT).to_string());
            record.insert(column.to_string(), Value::from(formatted));
        }

        Ok(record)
    }

    async fn attach_children(&self, records: &mut [Record]) -> AppResult<()> {
        if self.schema.children.is_empty() || records.is_empty() {
            return Ok(());
        }

        let ids: Vec<i32> = records.iter().filter_map(record_id).collect();
        for collection in self.schema.children {
            let mut grouped = children::load_for_parents(&self.db, collection, &ids).await?;
            for record in records.iter_mut() {
                let items = record_id(record)
                    .and_then(|id| grouped.remove(&id))
                    .unwrap_or_default();
                record.insert(collection.key.to_string(), Value::from(items));
            }
        }
        Ok(())
    }

    /// Every file path a record owns: file slots plus image collections.
    fn stored_paths(&self, record: &Record) -> Vec<String> {
        let mut paths: Vec<String> = self
            .schema
            .files
            .iter()
            .filter_map(|slot| record.get(slot.column).and_then(Value::as_str))
            .map(str::to_string)
            .collect();

        for collection in self.schema.children {
            if matches!(collection.kind, ChildKind::Image { .. }) {
                paths.extend(string_array(record.get(collection.key)));
            }
        }
        paths
    }
}

fn unknown_reference(path: &str) -> AppError {
    AppError::Validation(format!("Unknown file reference: {}", path))
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn clean(field: &Field, value: &str) -> String {
    if field.sanitize {
        strip_markup(value.trim())
    } else {
        value.to_string()
    }
}

fn push_file_columns(values: &mut Assignments, slot: &FileSlot, stored: &StoredFile) {
    values.push((slot.column, db_value(stored.path.clone())));
    if let Some(column) = slot.name_column {
        values.push((column, db_value(stored.file_name.clone())));
    }
    if let Some(column) = slot.size_column {
        values.push((column, db_value(stored.size.map(|s| s as i64))));
    }
}

/// Gallery rebuild rule on update.
fn replaces_gallery(mode: Option<GalleryMode>, items: Option<&ChildItems>) -> bool {
    match mode {
        Some(GalleryMode::Replace) => true,
        Some(GalleryMode::Preserve) => false,
        None => matches!(items, Some(ChildItems::Images(sources)) if sources.iter().any(ImageSource::is_new)),
    }
}

fn record_id(record: &Record) -> Option<i32> {
    record
        .get("id")
        .and_then(Value::as_i64)
        .and_then(|id| i32::try_from(id).ok())
}

fn string_array(value: Option<&Value>) -> impl Iterator<Item = String> + '_ {
    value
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InlineImage;

    fn inline() -> ImageSource {
        ImageSource::Inline(InlineImage {
            extension: "png".into(),
            bytes: vec![1],
        })
    }

    fn existing() -> ImageSource {
        ImageSource::Existing("uploads/gallery_a.png".into())
    }

    #[test]
    fn explicit_gallery_mode_wins() {
        let only_existing = ChildItems::Images(vec![existing()]);
        assert!(replaces_gallery(Some(GalleryMode::Replace), Some(&only_existing)));
        assert!(replaces_gallery(Some(GalleryMode::Replace), None));

        let with_upload = ChildItems::Images(vec![inline()]);
        assert!(!replaces_gallery(Some(GalleryMode::Preserve), Some(&with_upload)));
    }

    #[test]
    fn legacy_rule_needs_a_new_upload() {
        let only_existing = ChildItems::Images(vec![existing(), existing()]);
        assert!(!replaces_gallery(None, Some(&only_existing)));
        assert!(!replaces_gallery(None, None));

        let mixed = ChildItems::Images(vec![existing(), inline()]);
        assert!(replaces_gallery(None, Some(&mixed)));
    }

    #[test]
    fn sanitized_fields_lose_markup() {
        let field = Field::sanitized("company", false);
        assert_eq!(clean(&field, " <i>Acme</i> "), "Acme");

        let plain = Field::optional("description");
        assert_eq!(clean(&plain, "<p>kept</p>"), "<p>kept</p>");
    }

    #[test]
    fn string_array_skips_non_strings() {
        let value = serde_json::json!(["uploads/a.png", 3, null, "uploads/b.png"]);
        let paths: Vec<String> = string_array(Some(&value)).collect();
        assert_eq!(paths, vec!["uploads/a.png", "uploads/b.png"]);
        assert_eq!(string_array(None).count(), 0);
    }
}
