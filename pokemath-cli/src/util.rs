use anyhow::{Context, Result};
use chrono::NaiveDate;

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

pub fn parse_csv_numbers(s: &str) -> Result<Vec<u32>> {
    split_csv(s)
        .iter()
        .map(|token| {
            token
                .parse::<u32>()
                .with_context(|| format!("`{token}` is not a region or table number"))
        })
        .collect()
}

pub fn parse_csv_dates(s: &str) -> Result<Vec<NaiveDate>> {
    split_csv(s).iter().map(|token| parse_date(token)).collect()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("`{s}` is not a YYYY-MM-DD date"))
}
