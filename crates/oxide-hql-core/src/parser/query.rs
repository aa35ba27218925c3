//! Query expression parsing: `WITH`, set operations, the query body and
//! its clauses, ordering and row limits.

use super::error::ParseError;
use super::parser::{is_identifier, Parser};
use crate::ast::{
    Cte, CteMaterialization, CycleClause, CycleMarkValues, FetchClause, FetchMode, FetchPosition,
    GroupByClause, HavingClause, Instantiation, InstantiationArgument, InstantiationTarget,
    InstantiationValue, NullsPrecedence, OrderByClause, OrderedQuery, Query, QueryBody,
    QueryExpression, QueryForm, QueryOrder, RowCount, RowsKeyword, SearchClause, SearchOrder,
    SearchSpecification, SelectClause, SelectExpression, Selection, SetOperation, SetOperator,
    SetOperatorKind, SortDirection, SortedItem, WhereClause, WithClause,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    /// Parses `[WITH ...] orderedQuery (setOperator orderedQuery)*`.
    pub(super) fn parse_query_expression(&mut self) -> Result<QueryExpression, ParseError> {
        self.nested(|p| {
            let start = p.start();
            let with = if p.check_keyword(Keyword::With) {
                Some(p.parse_with_clause()?)
            } else {
                None
            };
            let first = p.parse_ordered_query()?;

            let mut rest = Vec::new();
            loop {
                let kind = match p.kind() {
                    TokenKind::Keyword(Keyword::Union) => SetOperatorKind::Union,
                    TokenKind::Keyword(Keyword::Intersect) => SetOperatorKind::Intersect,
                    TokenKind::Keyword(Keyword::Except) => SetOperatorKind::Except,
                    _ => break,
                };
                p.advance();
                let all = p.eat_keyword(Keyword::All);
                let query = p.parse_ordered_query()?;
                rest.push(SetOperation {
                    operator: SetOperator { kind, all },
                    query,
                });
            }

            Ok(QueryExpression {
                with,
                first,
                rest,
                span: p.span_from(start),
            })
        })
    }

    /// Parses `'(' queryExpression ')'`.
    pub(super) fn parse_parenthesized_query(&mut self) -> Result<QueryExpression, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let query = self.parse_query_expression()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(query)
    }

    // ==================== WITH ====================

    fn parse_with_clause(&mut self) -> Result<WithClause, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::With)?;
        let mut ctes = vec![self.parse_cte()?];
        while self.eat(&TokenKind::Comma) {
            ctes.push(self.parse_cte()?);
        }
        Ok(WithClause {
            ctes,
            span: self.span_from(start),
        })
    }

    fn parse_cte(&mut self) -> Result<Cte, ParseError> {
        let start = self.start();
        let name = self.parse_identifier()?;
        self.expect_keyword(Keyword::As)?;

        let materialization = if self.check_keyword(Keyword::Not)
            && self.check_nth_keyword(1, Keyword::Materialized)
        {
            self.advance();
            self.advance();
            CteMaterialization::NotMaterialized
        } else if self.eat_keyword(Keyword::Materialized) {
            CteMaterialization::Materialized
        } else {
            CteMaterialization::Unspecified
        };

        let query = self.parse_parenthesized_query()?;
        let search = if self.check_keyword(Keyword::Search) {
            Some(self.parse_search_clause()?)
        } else {
            None
        };
        let cycle = if self.check_keyword(Keyword::Cycle) {
            Some(self.parse_cycle_clause()?)
        } else {
            None
        };

        Ok(Cte {
            name,
            materialization,
            query: Box::new(query),
            search,
            cycle,
            span: self.span_from(start),
        })
    }

    /// `SEARCH BREADTH|DEPTH FIRST BY spec (, spec)* SET column`
    fn parse_search_clause(&mut self) -> Result<SearchClause, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Search)?;
        let order = if self.eat_keyword(Keyword::Breadth) {
            SearchOrder::BreadthFirst
        } else if self.eat_keyword(Keyword::Depth) {
            SearchOrder::DepthFirst
        } else {
            return Err(self.unexpected("BREADTH or DEPTH"));
        };
        self.expect_keyword(Keyword::First)?;
        self.expect_keyword(Keyword::By)?;

        let mut specifications = Vec::new();
        loop {
            let attribute = self.parse_identifier()?;
            let direction = self.parse_sort_direction();
            let nulls = self.parse_nulls_precedence()?;
            specifications.push(SearchSpecification {
                attribute,
                direction,
                nulls,
            });
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }

        self.expect_keyword(Keyword::Set)?;
        let set_column = self.parse_identifier()?;
        Ok(SearchClause {
            order,
            specifications,
            set_column,
            span: self.span_from(start),
        })
    }

    /// `CYCLE a (, b)* SET mark [TO v DEFAULT d] [USING path]`
    fn parse_cycle_clause(&mut self) -> Result<CycleClause, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Cycle)?;
        let mut attributes = vec![self.parse_identifier()?];
        while self.eat(&TokenKind::Comma) {
            attributes.push(self.parse_identifier()?);
        }

        self.expect_keyword(Keyword::Set)?;
        let mark_column = self.parse_identifier()?;
        let mark_values = if self.eat_keyword(Keyword::To) {
            let cycle = self.parse_literal()?;
            self.expect_keyword(Keyword::Default)?;
            let default = self.parse_literal()?;
            Some(CycleMarkValues { cycle, default })
        } else {
            None
        };
        let using = if self.eat_keyword(Keyword::Using) {
            Some(self.parse_identifier()?)
        } else {
            None
        };

        Ok(CycleClause {
            attributes,
            mark_column,
            mark_values,
            using,
            span: self.span_from(start),
        })
    }

    // ==================== Query body ====================

    fn parse_ordered_query(&mut self) -> Result<OrderedQuery, ParseError> {
        let start = self.start();
        let body = if self.check(&TokenKind::LeftParen) {
            QueryBody::Nested(Box::new(self.parse_parenthesized_query()?))
        } else {
            QueryBody::Query(Box::new(self.parse_query()?))
        };
        let order = self.parse_query_order()?;
        Ok(OrderedQuery {
            body,
            order,
            span: self.span_from(start),
        })
    }

    /// Parses a query in either clause order: `SELECT ... FROM ...` or
    /// `FROM ... [SELECT ...]`.
    fn parse_query(&mut self) -> Result<Query, ParseError> {
        let start = self.start();
        let form = if self.check_keyword(Keyword::Select) {
            QueryForm::SelectFirst
        } else if self.check_keyword(Keyword::From) {
            QueryForm::FromFirst
        } else {
            return Err(self.unexpected("SELECT or FROM"));
        };

        let mut select = None;
        if form == QueryForm::SelectFirst {
            select = Some(self.parse_select_clause()?);
        }
        let from = if self.check_keyword(Keyword::From) {
            Some(self.parse_from_clause()?)
        } else {
            None
        };
        let where_clause = if self.check_keyword(Keyword::Where) {
            Some(self.parse_where_clause()?)
        } else {
            None
        };
        let group_by = if self.check_keyword(Keyword::Group) {
            Some(self.parse_group_by_clause()?)
        } else {
            None
        };
        let having = if self.check_keyword(Keyword::Having) {
            Some(self.parse_having_clause()?)
        } else {
            None
        };
        if form == QueryForm::FromFirst && self.check_keyword(Keyword::Select) {
            select = Some(self.parse_select_clause()?);
        }

        Ok(Query {
            form,
            select,
            from,
            where_clause,
            group_by,
            having,
            span: self.span_from(start),
        })
    }

    fn parse_select_clause(&mut self) -> Result<SelectClause, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Select)?;
        let distinct = self.eat_keyword(Keyword::Distinct);
        let mut selections = vec![self.parse_selection()?];
        while self.eat(&TokenKind::Comma) {
            selections.push(self.parse_selection()?);
        }
        Ok(SelectClause {
            distinct,
            selections,
            span: self.span_from(start),
        })
    }

    fn parse_selection(&mut self) -> Result<Selection, ParseError> {
        let start = self.start();
        let item = if self.check_keyword(Keyword::New) && is_identifier(self.nth_kind(1)) {
            SelectExpression::Instantiation(self.parse_instantiation()?)
        } else if self.check_keyword(Keyword::Entry) && self.check_nth(1, &TokenKind::LeftParen) {
            self.advance();
            self.advance();
            let path = self.parse_path()?;
            self.expect(&TokenKind::RightParen)?;
            SelectExpression::MapEntry(path)
        } else if self.check_keyword(Keyword::Object) && self.check_nth(1, &TokenKind::LeftParen) {
            self.advance();
            self.advance();
            let variable = self.parse_identifier()?;
            self.expect(&TokenKind::RightParen)?;
            SelectExpression::Object(variable)
        } else {
            SelectExpression::Expression(self.parse_expression_or_predicate()?)
        };
        let variable = self.parse_variable()?;
        Ok(Selection {
            item,
            variable,
            span: self.span_from(start),
        })
    }

    /// `NEW (LIST | MAP | className) '(' argument (, argument)* ')'`
    fn parse_instantiation(&mut self) -> Result<Instantiation, ParseError> {
        self.nested(|p| {
            let start = p.start();
            p.expect_keyword(Keyword::New)?;
            let target = if p.check_keyword(Keyword::List) && p.check_nth(1, &TokenKind::LeftParen) {
                p.advance();
                InstantiationTarget::List
            } else if p.check_keyword(Keyword::Map) && p.check_nth(1, &TokenKind::LeftParen) {
                p.advance();
                InstantiationTarget::Map
            } else {
                InstantiationTarget::Class(p.parse_simple_path()?)
            };

            p.expect(&TokenKind::LeftParen)?;
            let mut arguments = Vec::new();
            loop {
                let value = if p.check_keyword(Keyword::New) && is_identifier(p.nth_kind(1)) {
                    InstantiationValue::Instantiation(p.parse_instantiation()?)
                } else {
                    InstantiationValue::Expression(p.parse_expression_or_predicate()?)
                };
                let variable = p.parse_variable()?;
                arguments.push(InstantiationArgument { value, variable });
                if !p.eat(&TokenKind::Comma) {
                    break;
                }
            }
            p.expect(&TokenKind::RightParen)?;

            Ok(Instantiation {
                target,
                arguments,
                span: p.span_from(start),
            })
        })
    }

    // ==================== Clauses ====================

    /// `WHERE predicate (, predicate)*`
    pub(super) fn parse_where_clause(&mut self) -> Result<WhereClause, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Where)?;
        let predicates = self.parse_predicate_list()?;
        Ok(WhereClause {
            predicates,
            span: self.span_from(start),
        })
    }

    fn parse_group_by_clause(&mut self) -> Result<GroupByClause, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Group)?;
        self.expect_keyword(Keyword::By)?;
        let mut items = vec![self.parse_expression()?];
        while self.eat(&TokenKind::Comma) {
            items.push(self.parse_expression()?);
        }
        Ok(GroupByClause {
            items,
            span: self.span_from(start),
        })
    }

    fn parse_having_clause(&mut self) -> Result<HavingClause, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Having)?;
        let predicates = self.parse_predicate_list()?;
        Ok(HavingClause {
            predicates,
            span: self.span_from(start),
        })
    }

    /// `ORDER BY item [ASC|DESC] [NULLS FIRST|LAST] (, ...)*`
    pub(super) fn parse_order_by_clause(&mut self) -> Result<OrderByClause, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Order)?;
        self.expect_keyword(Keyword::By)?;
        let mut items = Vec::new();
        loop {
            let expression = self.parse_expression()?;
            let direction = self.parse_sort_direction();
            let nulls = self.parse_nulls_precedence()?;
            items.push(SortedItem {
                expression,
                direction,
                nulls,
            });
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(OrderByClause {
            items,
            span: self.span_from(start),
        })
    }

    fn parse_sort_direction(&mut self) -> Option<SortDirection> {
        if self.eat_keyword(Keyword::Asc) {
            Some(SortDirection::Asc)
        } else if self.eat_keyword(Keyword::Desc) {
            Some(SortDirection::Desc)
        } else {
            None
        }
    }

    fn parse_nulls_precedence(&mut self) -> Result<Option<NullsPrecedence>, ParseError> {
        if !self.eat_keyword(Keyword::Nulls) {
            return Ok(None);
        }
        if self.eat_keyword(Keyword::First) {
            Ok(Some(NullsPrecedence::First))
        } else if self.eat_keyword(Keyword::Last) {
            Ok(Some(NullsPrecedence::Last))
        } else {
            Err(self.unexpected("FIRST or LAST"))
        }
    }

    // ==================== Ordering and limits ====================

    /// Parses whichever of `ORDER BY`, `LIMIT`, `OFFSET` and `FETCH` follow.
    fn parse_query_order(&mut self) -> Result<Option<QueryOrder>, ParseError> {
        let start = self.start();
        let order_by = if self.check_keyword(Keyword::Order) {
            Some(self.parse_order_by_clause()?)
        } else {
            None
        };
        let limit = if self.eat_keyword(Keyword::Limit) {
            Some(self.parse_row_count(false)?)
        } else {
            None
        };
        let offset = if self.eat_keyword(Keyword::Offset) {
            let count = self.parse_row_count(false)?;
            Some((count, self.parse_rows_keyword()))
        } else {
            None
        };
        let fetch = if self.check_keyword(Keyword::Fetch) {
            Some(self.parse_fetch_clause()?)
        } else {
            None
        };

        if order_by.is_none() && limit.is_none() && offset.is_none() && fetch.is_none() {
            return Ok(None);
        }
        Ok(Some(QueryOrder {
            order_by,
            limit,
            offset,
            fetch,
            span: self.span_from(start),
        }))
    }

    /// `FETCH FIRST|NEXT count [%] ROW|ROWS ONLY|WITH TIES`
    fn parse_fetch_clause(&mut self) -> Result<FetchClause, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Fetch)?;
        let position = if self.eat_keyword(Keyword::First) {
            FetchPosition::First
        } else if self.eat_keyword(Keyword::Next) {
            FetchPosition::Next
        } else {
            return Err(self.unexpected("FIRST or NEXT"));
        };
        let count = self.parse_row_count(true)?;
        let percent = self.eat(&TokenKind::Percent);
        let Some(rows) = self.parse_rows_keyword() else {
            return Err(self.unexpected("ROW or ROWS"));
        };
        let mode = if self.eat_keyword(Keyword::Only) {
            FetchMode::Only
        } else if self.eat_keyword(Keyword::With) {
            self.expect_keyword(Keyword::Ties)?;
            FetchMode::WithTies
        } else {
            return Err(self.unexpected("ONLY or WITH TIES"));
        };

        Ok(FetchClause {
            position,
            count,
            percent,
            rows,
            mode,
            span: self.span_from(start),
        })
    }

    fn parse_rows_keyword(&mut self) -> Option<RowsKeyword> {
        if self.eat_keyword(Keyword::Row) {
            Some(RowsKeyword::Row)
        } else if self.eat_keyword(Keyword::Rows) {
            Some(RowsKeyword::Rows)
        } else {
            None
        }
    }

    /// A parameter or an integer. A decimal is accepted only before `%`.
    fn parse_row_count(&mut self, percent_allowed: bool) -> Result<RowCount, ParseError> {
        match self.kind() {
            TokenKind::Colon | TokenKind::Question => {
                Ok(RowCount::Parameter(self.parse_parameter()?))
            }
            TokenKind::Integer(_) => self
                .parse_numeric_literal()
                .map(RowCount::Number)
                .ok_or_else(|| self.unexpected("row count")),
            TokenKind::Float(_) if percent_allowed && self.check_nth(1, &TokenKind::Percent) => self
                .parse_numeric_literal()
                .map(RowCount::Number)
                .ok_or_else(|| self.unexpected("row count")),
            _ => Err(self.unexpected("row count")),
        }
    }
}
