//! The built-in table slice encodings.

mod columnar;
mod row;

pub use columnar::*;
pub use row::*;
use tabula_error::{TabulaError, TabulaResult, tabula_bail, tabula_err};
use tabula_layout::{Layout, Value};

/// Reports a decoded body whose shape or types disagree with its header.
pub(crate) fn corrupt_body(err: TabulaError) -> TabulaError {
    tabula_err!(InvalidSerde: "body does not match its header: {}", err)
}

/// Check that `values` is one row of `layout`.
pub(crate) fn check_row(layout: &Layout, values: &[Value]) -> TabulaResult<()> {
    if values.len() != layout.len() {
        tabula_bail!(
            "row has {} values but layout {} has {} columns",
            values.len(),
            layout.name(),
            layout.len()
        );
    }
    for (value, field) in values.iter().zip(layout.fields()) {
        if !value.is_instance_of(field.field_type()) {
            tabula_bail!(
                MismatchedTypes: field.field_type(),
                format!("{} in column {}", value.as_view().kind(), field.name())
            );
        }
    }
    Ok(())
}

/// Check that `values` is one column of `layout` with `num_rows` cells.
pub(crate) fn check_column(
    layout: &Layout,
    column: usize,
    values: &[Value],
    num_rows: usize,
) -> TabulaResult<()> {
    if values.len() != num_rows {
        tabula_bail!(
            "column {} has {} values but the slice has {} rows",
            column,
            values.len(),
            num_rows
        );
    }
    let field = layout.fields()[column].field_type();
    if let Some(value) = values.iter().find(|value| !value.is_instance_of(field)) {
        tabula_bail!(
            MismatchedTypes: field,
            format!("{} in column {}", value.as_view().kind(), column)
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use tabula_error::TabulaError;
    use tabula_layout::{FieldType, Layout, RecordField, RecordType, Value};

    use crate::encodings::{ColumnarEncoding, RowEncoding};
    use crate::{EncodingRef, SliceHeader};

    fn header(num_rows: usize) -> SliceHeader {
        let layout = Layout::new(RecordType::new(
            "x",
            vec![RecordField::new("a", FieldType::Count)],
        ));
        SliceHeader::new(layout, num_rows, 0)
    }

    #[rstest]
    #[case::too_few_rows(&RowEncoding, vec![vec![Value::Count(1)]])]
    #[case::wide_row(&RowEncoding, vec![vec![Value::Count(1), Value::Count(2)], vec![]])]
    #[case::wrong_type(&RowEncoding, vec![vec![Value::from("a")], vec![Value::Count(1)]])]
    #[case::short_column(&ColumnarEncoding, vec![vec![Value::Count(1)]])]
    #[case::wrong_column_type(&ColumnarEncoding, vec![vec![Value::Count(1), Value::from("a")]])]
    fn bodies_disagreeing_with_their_header_are_serde_errors(
        #[case] encoding: EncodingRef,
        #[case] body: Vec<Vec<Value>>,
    ) {
        let body = flexbuffers::to_vec(body).unwrap();
        let err = encoding.decode(header(2), &body).unwrap_err();
        assert!(matches!(err, TabulaError::InvalidSerde(..)), "{err}");
    }
}
