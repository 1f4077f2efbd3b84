//! Session runner: the four operation groups, each on its own connection.

use std::fmt;

use crate::config::SessionConfig;
use crate::connection::{
    ConnectionManager, ExplainFindRequest, FindDocumentsOptions, ScopedConnection,
};
use crate::error::Result;
use crate::explain::{ExecutionSummary, execution_stats};
use crate::queries::{self, Page, SortDirection};
use crate::report::Report;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationGroup {
    Basic,
    Advanced,
    Aggregation,
    Indexing,
}

impl OperationGroup {
    /// Execution order of a full run.
    pub const ALL: [OperationGroup; 4] = [
        OperationGroup::Basic,
        OperationGroup::Advanced,
        OperationGroup::Aggregation,
        OperationGroup::Indexing,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OperationGroup::Basic => "basic queries",
            OperationGroup::Advanced => "advanced queries",
            OperationGroup::Aggregation => "aggregation pipelines",
            OperationGroup::Indexing => "indexing",
        }
    }
}

impl fmt::Display for OperationGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupOutcome {
    pub group: OperationGroup,
    pub error: Option<String>,
}

impl GroupOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub outcomes: Vec<GroupOutcome>,
}

impl RunSummary {
    pub fn failures(&self) -> impl Iterator<Item = &GroupOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_ok())
    }

    pub fn all_succeeded(&self) -> bool {
        self.failures().next().is_none()
    }
}

pub struct SessionRunner {
    manager: ConnectionManager,
    config: SessionConfig,
}

impl SessionRunner {
    pub fn new(config: SessionConfig) -> Result<Self> {
        Ok(Self { manager: ConnectionManager::new()?, config })
    }

    /// Run every group in order. A failing group never stops the ones after it.
    pub fn run_all<R: Report>(&self, report: &mut R) -> RunSummary {
        let outcomes =
            OperationGroup::ALL.iter().map(|&group| self.run_group(group, report)).collect();
        RunSummary { outcomes }
    }

    /// Connect, run one group, and close. Errors end the group and are logged
    /// and reported, not returned.
    pub fn run_group<R: Report>(&self, group: OperationGroup, report: &mut R) -> GroupOutcome {
        log::debug!("Starting {group}");
        let error = match self.connect_and_run(group, report) {
            Ok(()) => None,
            Err(err) => {
                log::error!("Error: {err}");
                report.error(err.to_string());
                Some(err.to_string())
            }
        };
        GroupOutcome { group, error }
    }

    fn connect_and_run<R: Report>(&self, group: OperationGroup, report: &mut R) -> Result<()> {
        let connection = self.manager.connect(&self.config)?;
        report.message("Connected to MongoDB");

        let result = match group {
            OperationGroup::Basic => self.basic_queries(&connection, report),
            OperationGroup::Advanced => self.advanced_queries(&connection, report),
            OperationGroup::Aggregation => self.aggregation_queries(&connection, report),
            OperationGroup::Indexing => self.indexing_queries(&connection, report),
        };

        connection.close();
        report.message("Connection closed");
        log::debug!("{} connection(s) still open", self.manager.open_connections());
        result
    }

    fn basic_queries<R: Report>(&self, conn: &ScopedConnection, report: &mut R) -> Result<()> {
        let params = &self.config.queries;

        report.section(format!("Books in {} genre", params.genre));
        report.documents(conn.find_documents(
            queries::genre_equals(&params.genre),
            FindDocumentsOptions::default(),
        )?);

        report.section(format!("Books published after {}", params.published_after));
        report.documents(conn.find_documents(
            queries::published_after(params.published_after),
            FindDocumentsOptions::default(),
        )?);

        report.section(format!("Books by {}", params.author));
        report.documents(conn.find_documents(
            queries::author_equals(&params.author),
            FindDocumentsOptions::default(),
        )?);

        report.section(format!("Updating price of '{}'", params.update_title));
        let counts = conn.update_one(
            queries::title_equals(&params.update_title),
            queries::set_price(params.update_price),
        )?;
        report.message(format!("Matched: {}, Modified: {}", counts.matched, counts.modified));

        if let Some(title) = &params.delete_title {
            report.section(format!("Deleting '{title}'"));
            let counts = conn.delete_one(queries::title_equals(title))?;
            report.message(format!("Deleted: {}", counts.deleted));
        }
        Ok(())
    }

    fn advanced_queries<R: Report>(&self, conn: &ScopedConnection, report: &mut R) -> Result<()> {
        let params = &self.config.queries;

        report.section(format!(
            "Books in stock and published after {}",
            params.in_stock_published_after
        ));
        report.documents(conn.find_documents(
            queries::in_stock_published_after(params.in_stock_published_after),
            FindDocumentsOptions::default(),
        )?);

        report.section("Books with projection (title, author, price)");
        report.documents(conn.find_documents(
            Default::default(),
            FindDocumentsOptions::projected(queries::listing_projection()),
        )?);

        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            report.section(format!("Books sorted by price {}", direction.label()));
            report.documents(conn.find_documents(
                Default::default(),
                FindDocumentsOptions::projected(queries::price_projection())
                    .sorted_by_price(direction),
            )?);
        }

        let page = Page::new(params.page, params.per_page);
        report.section(format!("Page {} ({} books per page)", page.number, page.per_page));
        report.documents(conn.find_documents(
            Default::default(),
            FindDocumentsOptions::projected(queries::listing_projection()).page(page),
        )?);
        Ok(())
    }

    fn aggregation_queries<R: Report>(
        &self,
        conn: &ScopedConnection,
        report: &mut R,
    ) -> Result<()> {
        report.section("Average price of books by genre");
        report.documents(conn.aggregate(queries::average_price_by_genre())?);

        report.section("Author with the most books");
        report.documents(conn.aggregate(queries::author_with_most_books())?);

        report.section("Books grouped by publication decade");
        report.documents(conn.aggregate(queries::books_by_decade())?);
        Ok(())
    }

    fn indexing_queries<R: Report>(&self, conn: &ScopedConnection, report: &mut R) -> Result<()> {
        let params = &self.config.queries;

        let title_index = conn.create_index(queries::title_index_keys())?;
        report.message(format!("Index created on 'title' field ({title_index})"));

        let compound_index = conn.create_index(queries::author_year_index_keys())?;
        report.message(format!(
            "Compound index created on 'author' and 'published_year' ({compound_index})"
        ));
        report.message(format!(
            "Indexes on {}: {}",
            conn.collection_name(),
            conn.index_names()?.join(", ")
        ));

        let filter = queries::title_equals(&params.explain_title);
        let runs = [
            ("Query without using index explicitly", None),
            ("Query using index (should be more efficient)", Some(queries::title_index_keys())),
        ];
        for (title, hint) in runs {
            report.section(title);
            let explain =
                conn.explain_find(ExplainFindRequest::execution_stats(filter.clone(), hint))?;
            let summary = ExecutionSummary::from_explain(&explain);
            let stats = execution_stats(&explain).cloned().unwrap_or(explain);
            report.documents(vec![stats]);
            report.message(summary.to_string());
        }
        Ok(())
    }
}
