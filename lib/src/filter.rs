use crate::{Location, Position};
use polars::prelude::*;

/// AND-combined row filter over a game log. Leaving a filter unset is the "All" choice.
#[derive(Clone, Default)]
pub struct GameFilter {
    filter_expr: Option<Expr>,
}

impl GameFilter {
    pub fn new() -> Self {
        Self { filter_expr: None }
    }

    pub fn team(mut self, team_name: &str) -> Self {
        let expr = col("team").eq(lit(team_name));
        self.extend_filter(expr)
    }

    pub fn position(mut self, position: Position) -> Self {
        let expr = col("position").eq(lit(position.to_string()));
        self.extend_filter(expr)
    }

    pub fn location(mut self, location: Location) -> Self {
        let expr = col("home").eq(lit(location.is_home()));
        self.extend_filter(expr)
    }

    pub fn player(mut self, player_name: &str) -> Self {
        let expr = col("player").eq(lit(player_name));
        self.extend_filter(expr)
    }

    // Optional variants so "All" selections can be chained without branching
    pub fn maybe_team(self, team_name: Option<&str>) -> Self {
        match team_name {
            Some(team_name) => self.team(team_name),
            None => self,
        }
    }

    pub fn maybe_position(self, position: Option<Position>) -> Self {
        match position {
            Some(position) => self.position(position),
            None => self,
        }
    }

    pub fn maybe_location(self, location: Option<Location>) -> Self {
        match location {
            Some(location) => self.location(location),
            None => self,
        }
    }

    // Combines the current filter with a new one using AND logic
    fn extend_filter(&mut self, new_expr: Expr) -> Self {
        self.filter_expr = match self.filter_expr.take() {
            Some(existing_expr) => Some(existing_expr.and(new_expr)),
            None => Some(new_expr),
        };
        self.clone()
    }

    // Builds the final filter expression
    pub fn build(self) -> Expr {
        self.filter_expr.unwrap_or_else(|| lit(true))
    }
}
