//! Query composition shared by the paginated listings
//!
//! Caller filters and sort fields are resolved against a per-listing
//! whitelist of columns. Unknown names are dropped; a known field whose
//! values cannot be parsed matches no rows.

use log::debug;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, IntoSimpleExpr, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Value,
};

use crate::shared::{Filter, PaginationParams, SortDirection, SortField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldKind {
    Int,
    Text,
    Bool,
}

/// A filterable / sortable column of a listing.
#[derive(Debug, Clone)]
pub(crate) struct Field {
    column: SimpleExpr,
    kind: FieldKind,
}

impl Field {
    pub fn of<C: ColumnTrait>(column: C, kind: FieldKind) -> Self {
        Self {
            column: IntoSimpleExpr::into_simple_expr(column),
            kind,
        }
    }

    fn parse(&self, raw: &str) -> Option<Value> {
        match self.kind {
            FieldKind::Int => raw.parse::<i32>().ok().map(Value::from),
            FieldKind::Text => Some(Value::from(raw.to_string())),
            FieldKind::Bool => match raw.to_ascii_lowercase().as_str() {
                "true" | "1" => Some(Value::from(true)),
                "false" | "0" => Some(Value::from(false)),
                _ => None,
            },
        }
    }

    fn condition(&self, raw_values: &[String]) -> SimpleExpr {
        let mut values: Vec<Value> = raw_values
            .iter()
            .filter_map(|raw| {
                let parsed = self.parse(raw);
                if parsed.is_none() {
                    debug!("Discarding unparsable filter value: {}", raw);
                }
                parsed
            })
            .collect();

        match values.len() {
            0 => Expr::val(1).eq(0),
            1 => Expr::expr(self.column.clone()).eq(values.remove(0)),
            _ => Expr::expr(self.column.clone()).is_in(values),
        }
    }
}

/// AND every resolvable caller filter into the query.
pub(crate) fn apply_filters<Q, R>(mut query: Q, filter: &Filter, resolve: R) -> Q
where
    Q: QueryFilter,
    R: Fn(&str) -> Option<Field>,
{
    for (name, value) in filter {
        match resolve(name) {
            Some(field) => query = query.filter(field.condition(value.values())),
            None => debug!("Ignoring unknown filter field: {}", name),
        }
    }
    query
}

/// Apply the caller's sort fields in order. The listing appends its own
/// default ordering afterwards so ties stay stable between pages.
pub(crate) fn apply_sort<Q, R>(mut query: Q, sort: &[SortField], resolve: R) -> Q
where
    Q: QueryOrder,
    R: Fn(&str) -> Option<Field>,
{
    for s in sort {
        match resolve(&s.field) {
            Some(field) => query = query.order_by(field.column, order(s.direction)),
            None => debug!("Ignoring unknown sort field: {}", s.field),
        }
    }
    query
}

fn order(direction: SortDirection) -> Order {
    match direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    }
}

/// Count every matching row, then load the requested page.
///
/// The two statements run independently; a write landing in between can
/// make `total_count` disagree with the page contents.
pub(crate) async fn fetch_page<E, M>(
    db: &DatabaseConnection,
    select: Select<E>,
    params: &PaginationParams,
) -> Result<(Vec<M>, u64), DbErr>
where
    E: EntityTrait,
    E::Model: Sync + 'static,
    M: FromQueryResult + Send,
{
    let total = select.clone().count(db).await?;
    let rows = select
        .offset(params.offset())
        .limit(params.limit)
        .into_model::<M>()
        .all(db)
        .await?;
    debug!(
        "Fetched page {} ({} rows of {} total)",
        params.page,
        rows.len(),
        total
    );
    Ok((rows, total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::entities::volunteer;
    use crate::shared::FilterValue;
    use sea_orm::{DbBackend, QueryTrait};

    fn resolve(name: &str) -> Option<Field> {
        match name {
            "city" => Some(Field::of(volunteer::Column::City, FieldKind::Text)),
            "pep_id" => Some(Field::of(volunteer::Column::PepId, FieldKind::Int)),
            "need_declaration" => Some(Field::of(volunteer::Column::NeedDeclaration, FieldKind::Bool)),
            _ => None,
        }
    }

    fn sql(filter: Filter, sort: Vec<SortField>) -> String {
        let select = apply_filters(volunteer::Entity::find(), &filter, resolve);
        apply_sort(select, &sort, resolve)
            .build(DbBackend::Sqlite)
            .to_string()
    }

    #[test]
    fn single_value_compares_with_equals() {
        let mut filter = Filter::new();
        filter.insert("city".into(), FilterValue::One("Recife".into()));
        let sql = sql(filter, vec![]);
        assert!(sql.contains(r#""volunteers"."city" = 'Recife'"#), "{sql}");
    }

    #[test]
    fn many_values_compare_with_in() {
        let mut filter = Filter::new();
        filter.insert(
            "pep_id".into(),
            FilterValue::Many(vec!["5".into(), "9".into()]),
        );
        let sql = sql(filter, vec![]);
        assert!(sql.contains(r#""volunteers"."pep_id" IN (5, 9)"#), "{sql}");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let mut filter = Filter::new();
        filter.insert("password_hash".into(), FilterValue::One("x".into()));
        let sort = vec![SortField {
            field: "password_hash".into(),
            direction: SortDirection::Desc,
        }];
        let sql = sql(filter, sort);
        assert!(!sql.contains("WHERE"), "{sql}");
        assert!(!sql.contains("ORDER BY"), "{sql}");
    }

    #[test]
    fn unparsable_values_match_nothing() {
        let mut filter = Filter::new();
        filter.insert("pep_id".into(), FilterValue::One("five".into()));
        let sql = sql(filter, vec![]);
        assert!(sql.contains("1 = 0"), "{sql}");
    }

    #[test]
    fn bool_values_accept_words_and_digits() {
        let field = Field::of(volunteer::Column::NeedDeclaration, FieldKind::Bool);
        assert_eq!(field.parse("TRUE"), Some(Value::from(true)));
        assert_eq!(field.parse("0"), Some(Value::from(false)));
        assert_eq!(field.parse("yes"), None);
    }

    #[test]
    fn sort_fields_keep_request_order() {
        let sort = vec![
            SortField {
                field: "city".into(),
                direction: SortDirection::Desc,
            },
            SortField {
                field: "pep_id".into(),
                direction: SortDirection::Asc,
            },
        ];
        let sql = sql(Filter::new(), sort);
        assert!(
            sql.contains(r#"ORDER BY "volunteers"."city" DESC, "volunteers"."pep_id" ASC"#),
            "{sql}"
        );
    }
}
