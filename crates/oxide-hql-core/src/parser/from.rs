//! FROM clause parsing: roots, joins, cross joins and `IN` collection joins.

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::{
    CollectionJoin, CrossJoin, EntityWithJoins, FromClause, FromRoot, Join, JoinKind,
    JoinRestriction, JoinSpecifier, JoinTarget, JoinType, RestrictionKeyword,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    /// Parses `FROM root joins* (, root joins*)*`.
    pub(super) fn parse_from_clause(&mut self) -> Result<FromClause, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::From)?;
        let mut roots = vec![self.parse_entity_with_joins()?];
        // `, IN (` was already taken by the join loop, so any comma left
        // here starts another root.
        while self.eat(&TokenKind::Comma) {
            roots.push(self.parse_entity_with_joins()?);
        }
        Ok(FromClause {
            roots,
            span: self.span_from(start),
        })
    }

    fn parse_entity_with_joins(&mut self) -> Result<EntityWithJoins, ParseError> {
        let start = self.start();
        let root = self.parse_from_root()?;
        let mut joins = Vec::new();
        loop {
            let join = if self.at_collection_join() {
                JoinSpecifier::Collection(self.parse_collection_join()?)
            } else if self.check_keyword(Keyword::Cross) && self.check_nth_keyword(1, Keyword::Join)
            {
                self.parse_cross_join()?
            } else if self.at_join() {
                JoinSpecifier::Join(self.parse_join()?)
            } else {
                break;
            };
            joins.push(join);
        }
        Ok(EntityWithJoins {
            root,
            joins,
            span: self.span_from(start),
        })
    }

    fn parse_from_root(&mut self) -> Result<FromRoot, ParseError> {
        let start = self.start();
        let lateral = self.eat_lateral();
        if lateral || self.check(&TokenKind::LeftParen) {
            let query = self.parse_parenthesized_query()?;
            let variable = self.parse_variable()?;
            return Ok(FromRoot::Subquery {
                lateral,
                query: Box::new(query),
                variable,
                span: self.span_from(start),
            });
        }

        let name = self.parse_simple_path()?;
        let variable = self.parse_variable()?;
        Ok(FromRoot::Entity {
            name,
            variable,
            span: self.span_from(start),
        })
    }

    /// Consumes `LATERAL` when a parenthesized subquery follows it.
    fn eat_lateral(&mut self) -> bool {
        if self.check_keyword(Keyword::Lateral) && self.check_nth(1, &TokenKind::LeftParen) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn at_collection_join(&self) -> bool {
        self.check(&TokenKind::Comma)
            && self.check_nth_keyword(1, Keyword::In)
            && self.check_nth(2, &TokenKind::LeftParen)
    }

    fn at_join(&self) -> bool {
        matches!(
            self.kind(),
            TokenKind::Keyword(
                Keyword::Inner
                    | Keyword::Left
                    | Keyword::Right
                    | Keyword::Full
                    | Keyword::Outer
                    | Keyword::Join
            )
        )
    }

    /// `, IN (path) alias`
    fn parse_collection_join(&mut self) -> Result<CollectionJoin, ParseError> {
        let start = self.start();
        self.expect(&TokenKind::Comma)?;
        self.expect_keyword(Keyword::In)?;
        self.expect(&TokenKind::LeftParen)?;
        let path = self.parse_path()?;
        self.expect(&TokenKind::RightParen)?;
        let variable = self.parse_variable()?;
        Ok(CollectionJoin {
            path,
            variable,
            span: self.span_from(start),
        })
    }

    /// `CROSS JOIN entity alias`, or a cross join against a subquery, which
    /// takes the shape of a regular join.
    fn parse_cross_join(&mut self) -> Result<JoinSpecifier, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Cross)?;
        self.expect_keyword(Keyword::Join)?;

        let lateral = self.eat_lateral();
        if lateral || self.check(&TokenKind::LeftParen) {
            let query = self.parse_parenthesized_query()?;
            let variable = self.parse_variable()?;
            let restriction = self.parse_join_restriction()?;
            return Ok(JoinSpecifier::Join(Join {
                join_type: JoinType {
                    kind: JoinKind::Cross,
                    outer: false,
                },
                fetch: false,
                target: JoinTarget::Subquery {
                    lateral,
                    query: Box::new(query),
                    variable,
                },
                restriction,
                span: self.span_from(start),
            }));
        }

        let entity = self.parse_simple_path()?;
        let variable = self.parse_variable()?;
        Ok(JoinSpecifier::Cross(CrossJoin {
            entity,
            variable,
            span: self.span_from(start),
        }))
    }

    /// `[INNER | (LEFT|RIGHT|FULL)? OUTER?] JOIN [FETCH] target [ON|WITH predicate]`
    fn parse_join(&mut self) -> Result<Join, ParseError> {
        let start = self.start();
        let kind = match self.kind() {
            TokenKind::Keyword(Keyword::Inner) => JoinKind::Inner,
            TokenKind::Keyword(Keyword::Left) => JoinKind::Left,
            TokenKind::Keyword(Keyword::Right) => JoinKind::Right,
            TokenKind::Keyword(Keyword::Full) => JoinKind::Full,
            _ => JoinKind::Unspecified,
        };
        if kind != JoinKind::Unspecified {
            self.advance();
        }
        let outer = kind != JoinKind::Inner && self.eat_keyword(Keyword::Outer);
        self.expect_keyword(Keyword::Join)?;
        let fetch = self.eat_keyword(Keyword::Fetch);

        let lateral = self.eat_lateral();
        let target = if lateral || self.check(&TokenKind::LeftParen) {
            let query = self.parse_parenthesized_query()?;
            JoinTarget::Subquery {
                lateral,
                query: Box::new(query),
                variable: self.parse_variable()?,
            }
        } else {
            if matches!(self.kind(), TokenKind::Keyword(kw) if kw.is_reserved())
                && !self.check_nth(1, &TokenKind::Dot)
            {
                return Err(self.unexpected("join target"));
            }
            let path = self.parse_path()?;
            JoinTarget::Path {
                path,
                variable: self.parse_variable()?,
            }
        };
        let restriction = self.parse_join_restriction()?;

        Ok(Join {
            join_type: JoinType { kind, outer },
            fetch,
            target,
            restriction,
            span: self.span_from(start),
        })
    }

    fn parse_join_restriction(&mut self) -> Result<Option<JoinRestriction>, ParseError> {
        let keyword = if self.eat_keyword(Keyword::On) {
            RestrictionKeyword::On
        } else if self.eat_keyword(Keyword::With) {
            RestrictionKeyword::With
        } else {
            return Ok(None);
        };
        let predicate = self.parse_predicate()?;
        Ok(Some(JoinRestriction { keyword, predicate }))
    }
}
