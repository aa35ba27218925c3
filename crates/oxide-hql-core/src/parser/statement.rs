//! Data manipulation statements: `UPDATE`, `DELETE` and `INSERT`.

use super::error::ParseError;
use super::parser::{is_soft_identifier, Parser};
use crate::ast::{
    Assignment, DeleteStatement, InsertSource, InsertStatement, TargetEntity, UpdateStatement,
    ValuesRow,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    /// `UPDATE [VERSIONED] entity [alias] SET path = value (, ...)* [WHERE ...]`
    pub(super) fn parse_update(&mut self) -> Result<UpdateStatement, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Update)?;
        // An entity may itself be named `Versioned`.
        let versioned =
            self.check_keyword(Keyword::Versioned) && is_soft_identifier(self.nth_kind(1));
        if versioned {
            self.advance();
        }
        let target = self.parse_target_entity()?;

        self.expect_keyword(Keyword::Set)?;
        let mut assignments = vec![self.parse_assignment()?];
        while self.eat(&TokenKind::Comma) {
            assignments.push(self.parse_assignment()?);
        }

        let where_clause = if self.check_keyword(Keyword::Where) {
            Some(self.parse_where_clause()?)
        } else {
            None
        };
        Ok(UpdateStatement {
            versioned,
            target,
            assignments,
            where_clause,
            span: self.span_from(start),
        })
    }

    fn parse_assignment(&mut self) -> Result<Assignment, ParseError> {
        let target = self.parse_simple_path()?;
        self.expect(&TokenKind::Eq)?;
        let value = self.parse_expression_or_predicate()?;
        Ok(Assignment { target, value })
    }

    /// `DELETE [FROM] entity [alias] [WHERE ...]`
    pub(super) fn parse_delete(&mut self) -> Result<DeleteStatement, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Delete)?;
        let from = self.eat_keyword(Keyword::From);
        let target = self.parse_target_entity()?;
        let where_clause = if self.check_keyword(Keyword::Where) {
            Some(self.parse_where_clause()?)
        } else {
            None
        };
        Ok(DeleteStatement {
            from,
            target,
            where_clause,
            span: self.span_from(start),
        })
    }

    /// `INSERT [INTO] entity [alias] (path, ...) (VALUES (...), ... | query)`
    pub(super) fn parse_insert(&mut self) -> Result<InsertStatement, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Insert)?;
        let into = self.eat_keyword(Keyword::Into);
        let target = self.parse_target_entity()?;

        self.expect(&TokenKind::LeftParen)?;
        let mut fields = vec![self.parse_simple_path()?];
        while self.eat(&TokenKind::Comma) {
            fields.push(self.parse_simple_path()?);
        }
        self.expect(&TokenKind::RightParen)?;

        let source = if self.eat_keyword(Keyword::Values) {
            let mut rows = vec![self.parse_values_row()?];
            while self.eat(&TokenKind::Comma) {
                rows.push(self.parse_values_row()?);
            }
            InsertSource::Values(rows)
        } else {
            InsertSource::Query(self.parse_query_expression()?)
        };

        Ok(InsertStatement {
            into,
            target,
            fields,
            source,
            span: self.span_from(start),
        })
    }

    fn parse_values_row(&mut self) -> Result<ValuesRow, ParseError> {
        let start = self.start();
        self.expect(&TokenKind::LeftParen)?;
        let mut values = vec![self.parse_expression()?];
        while self.eat(&TokenKind::Comma) {
            values.push(self.parse_expression()?);
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(ValuesRow {
            values,
            span: self.span_from(start),
        })
    }

    fn parse_target_entity(&mut self) -> Result<TargetEntity, ParseError> {
        let entity = self.parse_simple_path()?;
        let variable = self.parse_variable()?;
        Ok(TargetEntity { entity, variable })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Statement;

    fn parse(input: &str) -> Statement {
        Parser::new(input)
            .parse_statement()
            .unwrap_or_else(|e| panic!("Failed to parse {input}: {e}"))
    }

    // ===================================================================
    // UPDATE
    // ===================================================================

    #[test]
    fn test_update() {
        let Statement::Update(update) =
            parse("UPDATE Employee e SET e.salary = e.salary * 1.1, e.raised = true WHERE e.id = :id")
        else {
            panic!("Expected UPDATE");
        };
        assert!(!update.versioned);
        assert_eq!(update.target.entity.to_string(), "Employee");
        assert_eq!(update.assignments.len(), 2);
        assert_eq!(update.assignments[0].target.to_string(), "e.salary");
        assert!(update.where_clause.is_some());
    }

    #[test]
    fn test_update_versioned() {
        let Statement::Update(update) = parse("UPDATE VERSIONED Employee SET name = 'x'") else {
            panic!("Expected UPDATE");
        };
        assert!(update.versioned);
        assert!(update.target.variable.is_none());

        let Statement::Update(update) = parse("UPDATE Versioned SET name = 'x'") else {
            panic!("Expected UPDATE");
        };
        assert!(!update.versioned);
        assert_eq!(update.target.entity.to_string(), "Versioned");
    }

    #[test]
    fn test_update_requires_set() {
        let err = Parser::new("UPDATE Employee e WHERE e.id = 1")
            .parse_statement()
            .unwrap_err();
        assert!(err.expected.contains("SET"));
    }

    // ===================================================================
    // DELETE
    // ===================================================================

    #[test]
    fn test_delete() {
        let Statement::Delete(delete) = parse("DELETE FROM Employee e WHERE e.active = false") else {
            panic!("Expected DELETE");
        };
        assert!(delete.from);
        assert_eq!(delete.target.variable.as_ref().unwrap().name.value, "e");

        let Statement::Delete(delete) = parse("delete Employee") else {
            panic!("Expected DELETE");
        };
        assert!(!delete.from);
        assert!(delete.where_clause.is_none());
    }

    // ===================================================================
    // INSERT
    // ===================================================================

    #[test]
    fn test_insert_values() {
        let Statement::Insert(insert) =
            parse("INSERT INTO Employee (id, name) VALUES (1, 'a'), (2, :name)")
        else {
            panic!("Expected INSERT");
        };
        assert!(insert.into);
        assert_eq!(insert.fields.len(), 2);
        let InsertSource::Values(rows) = &insert.source else {
            panic!("Expected VALUES");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].values.len(), 2);
    }

    #[test]
    fn test_insert_select() {
        let Statement::Insert(insert) =
            parse("INSERT Archive (id, name) SELECT e.id, e.name FROM Employee e")
        else {
            panic!("Expected INSERT");
        };
        assert!(!insert.into);
        assert!(matches!(insert.source, InsertSource::Query(_)));
    }

    #[test]
    fn test_insert_requires_field_list() {
        let err = Parser::new("INSERT INTO Employee VALUES (1)")
            .parse_statement()
            .unwrap_err();
        assert!(err.expected.contains("'('"));
    }
}
