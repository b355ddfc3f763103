//! Stringified column access.

use polars::prelude::*;

use crate::error::{IngestError, Result};

/// Returns every value of `column` as text, keeping nulls as `None`.
///
/// Non-string columns are cast to strings first, so numeric identifiers are
/// rendered the way polars formats them.
pub fn column_values(df: &DataFrame, column: &str) -> Result<Vec<Option<String>>> {
    let col = df
        .column(column)
        .map_err(|_| IngestError::ColumnNotFound {
            column: column.to_string(),
        })?;
    let casted = col.cast(&DataType::String)?;
    let chunked = casted.str()?;
    Ok(chunked
        .iter()
        .map(|value| value.map(str::to_string))
        .collect())
}

/// Returns up to `limit` non-null values of a column, in row order.
pub(crate) fn non_null_sample(col: &Column, limit: usize) -> Result<Vec<String>> {
    let casted = col.cast(&DataType::String)?;
    let chunked = casted.str()?;
    Ok(chunked
        .iter()
        .flatten()
        .take(limit)
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_keep_nulls() {
        let df = DataFrame::new(vec![
            Series::new("sku".into(), &[Some("WH001"), None, Some("")]).into_column(),
        ])
        .unwrap();

        let values = column_values(&df, "sku").unwrap();
        assert_eq!(
            values,
            vec![Some("WH001".to_string()), None, Some(String::new())]
        );
    }

    #[test]
    fn test_numeric_column_is_stringified() {
        let df = DataFrame::new(vec![Series::new("code".into(), &[1234i64, 5678]).into_column()])
            .unwrap();

        let values = column_values(&df, "code").unwrap();
        assert_eq!(values, vec![Some("1234".to_string()), Some("5678".to_string())]);
    }

    #[test]
    fn test_unknown_column() {
        let df = DataFrame::new(vec![Series::new("a".into(), &["x"]).into_column()]).unwrap();
        assert!(matches!(
            column_values(&df, "sku"),
            Err(IngestError::ColumnNotFound { .. })
        ));
    }
}
