//! Single-scalar query helpers shared by every check.

use snowflake_api::{QueryResult, SnowflakeApi};
use tokio_postgres::Client;

use crate::error::{ValidateError, ValidateResult};

pub async fn pg_count(client: &Client, sql: &str) -> ValidateResult<i64> {
    let row = client.query_one(sql, &[]).await?;
    Ok(row.get(0))
}

/// Pull the first column of the first row out of a Snowflake scalar
/// query's Arrow result. Returns 0 for an empty result set (e.g. a
/// `HAVING COUNT(*) > 1` query with no violating groups).
pub async fn sf_count(api: &SnowflakeApi, sql: &str) -> ValidateResult<i64> {
    let result = api
        .exec(sql)
        .await
        .map_err(|e| ValidateError::Snowflake(e.to_string()))?;

    let QueryResult::Arrow(batches) = result else {
        return Ok(0);
    };

    for batch in &batches {
        if batch.num_rows() == 0 {
            continue;
        }
        let col = batch.column(0);
        if let Some(ints) = col.as_any().downcast_ref::<arrow::array::Int64Array>() {
            return Ok(ints.value(0));
        }
        if let Some(ints) = col.as_any().downcast_ref::<arrow::array::Int32Array>() {
            return Ok(ints.value(0) as i64);
        }
    }
    Ok(0)
}

/// Number of rows returned (used by PK_DUPLICATES, which caps at
/// `LIMIT 10` in the query itself).
pub async fn sf_row_count_of(api: &SnowflakeApi, sql: &str) -> ValidateResult<usize> {
    let result = api
        .exec(sql)
        .await
        .map_err(|e| ValidateError::Snowflake(e.to_string()))?;

    let QueryResult::Arrow(batches) = result else {
        return Ok(0);
    };
    Ok(batches.iter().map(|b| b.num_rows()).sum())
}
