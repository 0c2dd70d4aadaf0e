//! # Customers CLI: query and summarize a customer dataset.
//!
//! `assure customers query` prints the same `{customers, pagination, filters}`
//! document as `GET /v1/customers`. Invalid flags are reported per field and
//! exit non-zero.

use std::path::PathBuf;

use anyhow::{bail, Result};
use assure_core::query::{self, FilterEcho, RawCustomerQuery};
use assure_core::{dashboard, Customer, Pagination};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::{emit_json, load_customers};

/// Customers subcommand arguments.
#[derive(Args, Debug)]
pub struct CustomersArgs {
    #[command(subcommand)]
    pub command: CustomersCommand,
}

/// Available customers subcommands.
#[derive(Subcommand, Debug)]
pub enum CustomersCommand {
    /// Filter, sort, and paginate customers.
    Query(QueryArgs),

    /// Aggregate counts and totals over the dataset.
    Summary {
        /// JSON array of customers. Defaults to the sample dataset.
        #[arg(long)]
        data: Option<PathBuf>,
    },
}

/// Flags for `customers query`. Values are passed through as text and
/// validated exactly as the HTTP query string is.
#[derive(Args, Debug, Default)]
pub struct QueryArgs {
    /// JSON array of customers. Defaults to the sample dataset.
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Case-insensitive substring over names, email, phone, and number.
    #[arg(long)]
    pub search: Option<String>,

    /// Individual, Corporate, or All.
    #[arg(long = "type")]
    pub customer_type: Option<String>,

    /// Active, Inactive, Suspended, Pending_KYC, or All.
    #[arg(long)]
    pub status: Option<String>,

    /// Pending, In_Progress, Verified, Rejected, Expired, or All.
    #[arg(long)]
    pub kyc_status: Option<String>,

    /// Low, Medium, High, Critical, or All.
    #[arg(long)]
    pub risk_category: Option<String>,

    #[arg(long)]
    pub account_manager: Option<String>,

    /// Narrows Corporate customers only.
    #[arg(long)]
    pub industry: Option<String>,

    /// Inclusive lower bound on creation date (YYYY-MM-DD or RFC 3339).
    #[arg(long)]
    pub from: Option<String>,

    /// Inclusive upper bound on creation date, extended to end of day.
    #[arg(long)]
    pub to: Option<String>,

    /// displayName, createdAt, updatedAt, or totalPremium.
    #[arg(long)]
    pub sort_by: Option<String>,

    /// asc or desc.
    #[arg(long)]
    pub sort_order: Option<String>,

    #[arg(long)]
    pub page: Option<String>,

    #[arg(long)]
    pub limit: Option<String>,
}

impl QueryArgs {
    /// Map the flags onto the shared raw query.
    pub fn to_raw(&self) -> RawCustomerQuery {
        RawCustomerQuery {
            search: self.search.clone(),
            customer_type: self.customer_type.clone(),
            status: self.status.clone(),
            kyc_status: self.kyc_status.clone(),
            risk_category: self.risk_category.clone(),
            account_manager: self.account_manager.clone(),
            industry: self.industry.clone(),
            created_date_from: self.from.clone(),
            created_date_to: self.to.clone(),
            sort_by: self.sort_by.clone(),
            sort_order: self.sort_order.clone(),
            page: self.page.clone(),
            limit: self.limit.clone(),
        }
    }
}

/// Output of `customers query`; same shape as the HTTP list response.
#[derive(Debug, Serialize)]
pub struct QueryOutput {
    pub customers: Vec<Customer>,
    pub pagination: Pagination,
    pub filters: FilterEcho,
}

/// Execute the customers subcommand.
pub fn run_customers(args: &CustomersArgs) -> Result<u8> {
    match &args.command {
        CustomersCommand::Query(query_args) => {
            let customers = load_customers(query_args.data.as_deref())?;
            let output = query_customers(&customers, query_args)?;
            tracing::info!(
                returned = output.customers.len(),
                total = output.pagination.total,
                "query complete"
            );
            emit_json(&output, None)?;
            Ok(0)
        }
        CustomersCommand::Summary { data } => {
            let customers = load_customers(data.as_deref())?;
            emit_json(&dashboard::summarize(&customers), None)?;
            Ok(0)
        }
    }
}

/// Validate the flags and run the query pipeline.
pub fn query_customers(customers: &[Customer], args: &QueryArgs) -> Result<QueryOutput> {
    let query = match args.to_raw().parse() {
        Ok(q) => q,
        Err(errors) => {
            let joined = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            bail!("invalid query: {joined}");
        }
    };
    let page = query::run(customers, &query);
    Ok(QueryOutput {
        customers: page.items,
        pagination: page.pagination,
        filters: query.echo(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assure_core::sample;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(subcommand)]
        command: CustomersCommand,
    }

    fn parse(args: &[&str]) -> CustomersCommand {
        let mut argv = vec!["customers"];
        argv.extend_from_slice(args);
        TestCli::try_parse_from(argv).unwrap().command
    }

    fn query_args(args: &[&str]) -> QueryArgs {
        match parse(args) {
            CustomersCommand::Query(q) => q,
            other => panic!("expected query, got {other:?}"),
        }
    }

    #[test]
    fn flags_map_to_raw_query() {
        let args = query_args(&[
            "query",
            "--type",
            "Corporate",
            "--kyc-status",
            "Verified",
            "--from",
            "2024-01-01",
            "--sort-by",
            "totalPremium",
            "--page",
            "2",
        ]);
        let raw = args.to_raw();
        assert_eq!(raw.customer_type.as_deref(), Some("Corporate"));
        assert_eq!(raw.kyc_status.as_deref(), Some("Verified"));
        assert_eq!(raw.created_date_from.as_deref(), Some("2024-01-01"));
        assert_eq!(raw.sort_by.as_deref(), Some("totalPremium"));
        assert_eq!(raw.page.as_deref(), Some("2"));
        assert!(raw.limit.is_none());
    }

    #[test]
    fn premium_ascending_first_page() {
        let args = query_args(&[
            "query",
            "--sort-by",
            "totalPremium",
            "--sort-order",
            "asc",
            "--limit",
            "1",
        ]);
        let output = query_customers(&sample::two_customers(), &args).unwrap();
        assert_eq!(output.customers.len(), 1);
        assert_eq!(output.customers[0].metrics.total_premium, 2400.0);
        assert_eq!(output.pagination.total, 2);
        assert_eq!(output.pagination.total_pages, 2);
    }

    #[test]
    fn corporate_industry_filter() {
        let args = query_args(&["query", "--type", "Corporate", "--industry", "Information Technology"]);
        let output = query_customers(&sample::two_customers(), &args).unwrap();
        let names: Vec<&str> = output.customers.iter().map(|c| c.display_name.as_str()).collect();
        assert_eq!(names, vec!["TechCorp Solutions Inc."]);
        assert_eq!(output.filters.customer_type, "Corporate");
    }

    #[test]
    fn invalid_flags_fail_with_field_names() {
        let args = query_args(&["query", "--page", "0", "--status", "Dormant"]);
        let err = query_customers(&sample::customers(), &args).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("page"));
        assert!(message.contains("status"));
    }

    #[test]
    fn output_matches_http_shape() {
        let output = query_customers(&sample::customers(), &QueryArgs::default()).unwrap();
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["pagination"]["totalPages"], 1);
        assert_eq!(value["filters"]["type"], "All");
        assert_eq!(value["customers"].as_array().unwrap().len(), 8);
    }

    #[test]
    fn summary_parses_data_flag() {
        match parse(&["summary", "--data", "book.json"]) {
            CustomersCommand::Summary { data } => {
                assert_eq!(data, Some(PathBuf::from("book.json")));
            }
            other => panic!("expected summary, got {other:?}"),
        }
    }

    #[test]
    fn query_reads_dataset_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.json");
        std::fs::write(&path, serde_json::to_string(&sample::two_customers()).unwrap()).unwrap();
        let customers = load_customers(Some(path.as_path())).unwrap();
        let args = query_args(&["query", "--search", "sarah"]);
        let output = query_customers(&customers, &args).unwrap();
        assert_eq!(output.customers.len(), 1);
        assert_eq!(output.customers[0].display_name, "Sarah Johnson");
    }
}
