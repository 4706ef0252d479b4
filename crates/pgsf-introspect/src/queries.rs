//! The introspector's catalog queries. Each function owns one SQL
//! statement against `information_schema`/`pg_catalog` and maps rows
//! onto the [`pgsf_core::model`] types.

use pgsf_core::model::{
    CheckConstraint, Column, ForeignKey, Function, IdentityKind, Index, KeyConstraint, Sequence,
    Table, TableKind, Trigger, View,
};
use tokio_postgres::Client;

use crate::error::{IntrospectError, IntrospectResult};

fn query_err(query: &'static str) -> impl FnOnce(tokio_postgres::Error) -> IntrospectError {
    move |source| IntrospectError::Query { query, source }
}

/// Schemas with their owner and table count, filtered per the
/// allowlist (`*` means "all non-system").
pub async fn fetch_schemas(
    client: &Client,
    allowlist: &[String],
) -> IntrospectResult<Vec<(String, String)>> {
    const Q: &str = "SELECT n.nspname, pg_get_userbyid(n.nspowner) \
         FROM pg_namespace n \
         WHERE n.nspname NOT IN ('pg_toast', 'pg_temp_1', 'pg_toast_temp_1') \
         ORDER BY n.nspname";

    let rows = client.query(Q, &[]).await.map_err(query_err(Q))?;
    let wildcard = allowlist.iter().any(|s| s == "*");

    let mut schemas = Vec::new();
    for row in rows {
        let name: String = row.get(0);
        let owner: String = row.get(1);
        if wildcard {
            if name == "pg_catalog" || name == "information_schema" {
                continue;
            }
        } else if !allowlist.iter().any(|s| s == &name) {
            continue;
        }
        schemas.push((name, owner));
    }
    Ok(schemas)
}

struct TableMeta {
    name: String,
    kind: TableKind,
    size_bytes: u64,
    approx_rows: i64,
    comment: Option<String>,
}

const FETCH_TABLES_SQL: &str = "SELECT t.table_name, t.table_type, \
     pg_total_relation_size(format('%I.%I', t.table_schema, t.table_name)::regclass)::bigint, \
     COALESCE((SELECT c.reltuples::bigint FROM pg_class c \
               JOIN pg_namespace n ON n.oid = c.relnamespace \
               WHERE c.relname = t.table_name AND n.nspname = t.table_schema), 0), \
     obj_description(format('%I.%I', t.table_schema, t.table_name)::regclass::oid) \
     FROM information_schema.tables t \
     WHERE t.table_schema = $1 AND t.table_type IN ('BASE TABLE', 'VIEW', 'MATERIALIZED VIEW') \
     ORDER BY 3 DESC NULLS LAST, t.table_name";

async fn fetch_table_metas(client: &Client, schema: &str) -> IntrospectResult<Vec<TableMeta>> {
    let rows = client
        .query(FETCH_TABLES_SQL, &[&schema])
        .await
        .map_err(query_err(FETCH_TABLES_SQL))?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let table_type: String = row.get(1);
            let kind = match table_type.as_str() {
                "VIEW" => TableKind::View,
                "MATERIALIZED VIEW" => TableKind::Matview,
                _ => TableKind::Base,
            };
            TableMeta {
                name: row.get(0),
                kind,
                size_bytes: row.get::<_, i64>(2).max(0) as u64,
                approx_rows: row.get(3),
                comment: row.get(4),
            }
        })
        .collect())
}

const FETCH_COLUMNS_SQL: &str = "SELECT c.ordinal_position, c.column_name, c.data_type, \
     c.udt_name, c.character_maximum_length, c.numeric_precision, c.numeric_scale, \
     c.is_nullable, c.column_default, c.is_identity, c.identity_generation, \
     c.identity_start, c.identity_increment, c.is_generated, \
     col_description(format('%I.%I', c.table_schema, c.table_name)::regclass::oid, c.ordinal_position), \
     pg_get_serial_sequence(format('%I.%I', c.table_schema, c.table_name), c.column_name) \
     FROM information_schema.columns c \
     WHERE c.table_schema = $1 AND c.table_name = $2 \
     ORDER BY c.ordinal_position";

/// Columns for one table, in ordinal order.
pub async fn fetch_columns(
    client: &Client,
    schema: &str,
    table: &str,
) -> IntrospectResult<Vec<Column>> {
    let rows = client
        .query(FETCH_COLUMNS_SQL, &[&schema, &table])
        .await
        .map_err(query_err(FETCH_COLUMNS_SQL))?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let is_identity: String = row.get(9);
            let identity = if is_identity == "YES" {
                let generation: Option<String> = row.get(10);
                match generation.as_deref() {
                    Some("ALWAYS") => IdentityKind::Always,
                    _ => IdentityKind::ByDefault,
                }
            } else {
                IdentityKind::None
            };

            let identity_start: Option<String> = row.get(11);
            let identity_increment: Option<String> = row.get(12);
            let is_generated: String = row.get(13);

            Column {
                position: row.get(0),
                name: row.get(1),
                source_type: row.get(2),
                udt_name: row.get(3),
                char_max_len: row.get(4),
                numeric_precision: row.get(5),
                numeric_scale: row.get(6),
                nullable: row.get::<_, String>(7) == "YES",
                default_expr: row.get(8),
                identity,
                identity_start: identity_start.and_then(|s| s.parse().ok()),
                identity_increment: identity_increment.and_then(|s| s.parse().ok()),
                generated: is_generated == "ALWAYS",
                serial_sequence_fqn: row.get(15),
                comment: row.get(14),
            }
        })
        .collect())
}

const FETCH_KEYS_SQL: &str = "SELECT tc.constraint_name, array_agg(kcu.column_name ORDER BY kcu.ordinal_position) \
     FROM information_schema.table_constraints tc \
     JOIN information_schema.key_column_usage kcu \
       ON tc.constraint_name = kcu.constraint_name AND tc.table_schema = kcu.table_schema \
     WHERE tc.table_schema = $1 AND tc.table_name = $2 AND tc.constraint_type = $3 \
     GROUP BY tc.constraint_name";

async fn fetch_keys(
    client: &Client,
    schema: &str,
    table: &str,
    constraint_type: &str,
) -> IntrospectResult<Vec<KeyConstraint>> {
    let rows = client
        .query(FETCH_KEYS_SQL, &[&schema, &table, &constraint_type])
        .await
        .map_err(query_err(FETCH_KEYS_SQL))?;

    Ok(rows
        .into_iter()
        .map(|row| KeyConstraint {
            name: row.get(0),
            columns: row.get(1),
        })
        .collect())
}

pub async fn fetch_primary_keys(
    client: &Client,
    schema: &str,
    table: &str,
) -> IntrospectResult<Vec<KeyConstraint>> {
    fetch_keys(client, schema, table, "PRIMARY KEY").await
}

pub async fn fetch_unique_keys(
    client: &Client,
    schema: &str,
    table: &str,
) -> IntrospectResult<Vec<KeyConstraint>> {
    fetch_keys(client, schema, table, "UNIQUE").await
}

const FETCH_FOREIGN_KEYS_SQL: &str = "SELECT tc.constraint_name, \
     array_agg(DISTINCT kcu.column_name), ccu.table_schema, ccu.table_name, \
     array_agg(DISTINCT ccu.column_name), rc.update_rule, rc.delete_rule \
     FROM information_schema.table_constraints tc \
     JOIN information_schema.key_column_usage kcu \
       ON tc.constraint_name = kcu.constraint_name AND tc.table_schema = kcu.table_schema \
     JOIN information_schema.constraint_column_usage ccu \
       ON ccu.constraint_name = tc.constraint_name AND ccu.table_schema = tc.table_schema \
     JOIN information_schema.referential_constraints rc \
       ON tc.constraint_name = rc.constraint_name AND tc.table_schema = rc.constraint_schema \
     WHERE tc.constraint_type = 'FOREIGN KEY' AND tc.table_schema = $1 AND tc.table_name = $2 \
     GROUP BY tc.constraint_name, ccu.table_schema, ccu.table_name, rc.update_rule, rc.delete_rule";

pub async fn fetch_foreign_keys(
    client: &Client,
    schema: &str,
    table: &str,
) -> IntrospectResult<Vec<ForeignKey>> {
    let rows = client
        .query(FETCH_FOREIGN_KEYS_SQL, &[&schema, &table])
        .await
        .map_err(query_err(FETCH_FOREIGN_KEYS_SQL))?;

    Ok(rows
        .into_iter()
        .map(|row| ForeignKey {
            name: row.get(0),
            columns: row.get(1),
            ref_schema: row.get(2),
            ref_table: row.get(3),
            ref_columns: row.get(4),
            on_update: row.get(5),
            on_delete: row.get(6),
        })
        .collect())
}

const FETCH_CHECKS_SQL: &str = "SELECT cc.constraint_name, cc.check_clause \
     FROM information_schema.check_constraints cc \
     JOIN information_schema.table_constraints tc ON cc.constraint_name = tc.constraint_name \
     WHERE tc.table_schema = $1 AND tc.table_name = $2";

pub async fn fetch_checks(
    client: &Client,
    schema: &str,
    table: &str,
) -> IntrospectResult<Vec<CheckConstraint>> {
    let rows = client
        .query(FETCH_CHECKS_SQL, &[&schema, &table])
        .await
        .map_err(query_err(FETCH_CHECKS_SQL))?;

    Ok(rows
        .into_iter()
        .map(|row| CheckConstraint {
            name: row.get(0),
            expression: row.get(1),
        })
        .collect())
}

const FETCH_INDEXES_SQL: &str = "SELECT i.relname, ix.indisunique, \
     array_agg(a.attname ORDER BY array_position(ix.indkey, a.attnum)) \
     FROM pg_index ix \
     JOIN pg_class i ON i.oid = ix.indexrelid \
     JOIN pg_class t ON t.oid = ix.indrelid \
     JOIN pg_namespace n ON n.oid = t.relnamespace \
     JOIN pg_attribute a ON a.attrelid = t.oid AND a.attnum = ANY(ix.indkey) \
     WHERE n.nspname = $1 AND t.relname = $2 \
     GROUP BY i.relname, ix.indisunique \
     ORDER BY i.relname";

pub async fn fetch_indexes(
    client: &Client,
    schema: &str,
    table: &str,
) -> IntrospectResult<Vec<Index>> {
    let rows = client
        .query(FETCH_INDEXES_SQL, &[&schema, &table])
        .await
        .map_err(query_err(FETCH_INDEXES_SQL))?;

    Ok(rows
        .into_iter()
        .map(|row| Index {
            name: row.get(0),
            is_unique: row.get(1),
            columns: row.get(2),
        })
        .collect())
}

const FETCH_SEQUENCES_SQL: &str = "SELECT sequence_name, start_value::bigint, increment::bigint \
     FROM information_schema.sequences WHERE sequence_schema = $1 ORDER BY sequence_name";

pub async fn fetch_sequences(client: &Client, schema: &str) -> IntrospectResult<Vec<Sequence>> {
    let rows = client
        .query(FETCH_SEQUENCES_SQL, &[&schema])
        .await
        .map_err(query_err(FETCH_SEQUENCES_SQL))?;

    Ok(rows
        .into_iter()
        .map(|row| Sequence {
            name: row.get(0),
            start_value: row.get(1),
            increment_by: row.get(2),
        })
        .collect())
}

const FETCH_VIEWS_SQL: &str = "SELECT table_name, view_definition, false AS is_matview \
     FROM information_schema.views WHERE table_schema = $1 \
     UNION ALL \
     SELECT matviewname, definition, true FROM pg_matviews WHERE schemaname = $1 \
     ORDER BY 1";

pub async fn fetch_views(client: &Client, schema: &str) -> IntrospectResult<Vec<View>> {
    let rows = client
        .query(FETCH_VIEWS_SQL, &[&schema])
        .await
        .map_err(query_err(FETCH_VIEWS_SQL))?;

    Ok(rows
        .into_iter()
        .map(|row| View {
            name: row.get(0),
            definition: row.get::<_, Option<String>>(1).unwrap_or_default(),
            is_materialized: row.get(2),
        })
        .collect())
}

const FETCH_FUNCTIONS_SQL: &str = "SELECT r.routine_name, r.data_type, \
     array_remove(array_agg(p.parameter_name || ' ' || p.data_type), NULL) \
     FROM information_schema.routines r \
     LEFT JOIN information_schema.parameters p ON r.specific_name = p.specific_name \
     WHERE r.routine_schema = $1 \
     GROUP BY r.routine_name, r.data_type \
     ORDER BY r.routine_name";

pub async fn fetch_functions(client: &Client, schema: &str) -> IntrospectResult<Vec<Function>> {
    let rows = client
        .query(FETCH_FUNCTIONS_SQL, &[&schema])
        .await
        .map_err(query_err(FETCH_FUNCTIONS_SQL))?;

    Ok(rows
        .into_iter()
        .map(|row| Function {
            name: row.get(0),
            return_type: row.get::<_, Option<String>>(1).unwrap_or_default(),
            parameters: row.get(2),
        })
        .collect())
}

const FETCH_TRIGGERS_SQL: &str = "SELECT trigger_name, action_timing, event_manipulation, \
     action_statement \
     FROM information_schema.triggers \
     WHERE event_object_schema = $1 AND event_object_table = $2 \
     ORDER BY trigger_name";

pub async fn fetch_triggers(
    client: &Client,
    schema: &str,
    table: &str,
) -> IntrospectResult<Vec<Trigger>> {
    let rows = client
        .query(FETCH_TRIGGERS_SQL, &[&schema, &table])
        .await
        .map_err(query_err(FETCH_TRIGGERS_SQL))?;

    Ok(rows
        .into_iter()
        .map(|row| Trigger {
            name: row.get(0),
            timing: row.get(1),
            event: row.get(2),
            function_name: row.get::<_, String>(3),
        })
        .collect())
}

const FETCH_EXTENSIONS_SQL: &str =
    "SELECT extname FROM pg_extension e JOIN pg_namespace n ON n.oid = e.extnamespace \
     ORDER BY extname";

pub async fn fetch_extensions(client: &Client) -> IntrospectResult<Vec<String>> {
    let rows = client
        .query(FETCH_EXTENSIONS_SQL, &[])
        .await
        .map_err(query_err(FETCH_EXTENSIONS_SQL))?;
    Ok(rows.into_iter().map(|row| row.get(0)).collect())
}

/// Assemble one fully populated `Table` for a `BASE TABLE` entry,
/// firing the column/constraint/index/trigger queries.
pub(crate) async fn load_base_table(
    client: &Client,
    schema: &str,
    meta_name: &str,
) -> IntrospectResult<Table> {
    let columns = fetch_columns(client, schema, meta_name).await?;
    let primary_keys = fetch_primary_keys(client, schema, meta_name).await?;
    let unique_keys = fetch_unique_keys(client, schema, meta_name).await?;
    let foreign_keys = fetch_foreign_keys(client, schema, meta_name).await?;
    let checks = fetch_checks(client, schema, meta_name).await?;
    let indexes = fetch_indexes(client, schema, meta_name).await?;
    let triggers = fetch_triggers(client, schema, meta_name).await?;

    Ok(Table {
        name: meta_name.to_string(),
        kind: TableKind::Base,
        size_bytes: 0,
        approx_rows: 0,
        comment: None,
        columns,
        constraints: pgsf_core::model::Constraints {
            primary_keys,
            unique_keys,
            foreign_keys,
            checks,
        },
        indexes,
        triggers,
    })
}

pub(crate) async fn fetch_tables_for_schema(
    client: &Client,
    schema: &str,
) -> IntrospectResult<Vec<Table>> {
    let metas = fetch_table_metas(client, schema).await?;
    let mut tables = Vec::with_capacity(metas.len());
    for meta in metas {
        let mut table = load_base_table(client, schema, &meta.name).await?;
        table.kind = meta.kind;
        table.size_bytes = meta.size_bytes;
        table.approx_rows = meta.approx_rows;
        table.comment = meta.comment;
        tables.push(table);
    }
    Ok(tables)
}
