/// Listing record and its column schema
///
/// `Column` is the single place the dataset layout is defined: the sink writes
/// `Column::ALL` as the header and asks the record for each column in that order.
use crate::model::{ExperienceRange, SalaryRange};
use chrono::NaiveDate;

/// One column of the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Title,
    TitleHref,
    Company,
    CompanyHref,
    Location,
    MinExp,
    MaxExp,
    IsRemote,
    Deployment,
    MinSalary,
    MaxSalary,
    Currency,
    Brutto,
    Published,
    Description,
}

impl Column {
    /// Every column in dataset order
    pub const ALL: [Column; 15] = [
        Column::Title,
        Column::TitleHref,
        Column::Company,
        Column::CompanyHref,
        Column::Location,
        Column::MinExp,
        Column::MaxExp,
        Column::IsRemote,
        Column::Deployment,
        Column::MinSalary,
        Column::MaxSalary,
        Column::Currency,
        Column::Brutto,
        Column::Published,
        Column::Description,
    ];

    /// Header name of the column
    pub fn name(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::TitleHref => "title_href",
            Self::Company => "company",
            Self::CompanyHref => "company_href",
            Self::Location => "location",
            Self::MinExp => "min_exp",
            Self::MaxExp => "max_exp",
            Self::IsRemote => "is_remote",
            Self::Deployment => "deployment",
            Self::MinSalary => "min_salary",
            Self::MaxSalary => "max_salary",
            Self::Currency => "currency",
            Self::Brutto => "brutto",
            Self::Published => "published",
            Self::Description => "description",
        }
    }

    /// Header row
    pub fn header() -> Vec<&'static str> {
        Self::ALL.iter().map(Column::name).collect()
    }
}

/// A fully assembled listing, ready for the sink
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRecord {
    pub title: String,
    pub title_href: String,
    pub company: String,
    pub company_href: String,
    pub location: String,
    pub experience: ExperienceRange,
    pub is_remote: bool,
    pub deployment: Option<String>,
    pub salary: Option<SalaryRange>,
    pub published: Option<NaiveDate>,
    pub description: Option<String>,
}

impl ListingRecord {
    /// Serialized value of one column, `None` when absent
    pub fn value(&self, column: Column) -> Option<String> {
        match column {
            Column::Title => Some(self.title.clone()),
            Column::TitleHref => Some(self.title_href.clone()),
            Column::Company => Some(self.company.clone()),
            Column::CompanyHref => Some(self.company_href.clone()),
            Column::Location => Some(self.location.clone()),
            Column::MinExp => self.experience.min.map(|v| v.to_string()),
            Column::MaxExp => self.experience.max.map(|v| v.to_string()),
            Column::IsRemote => Some(self.is_remote.to_string()),
            Column::Deployment => self.deployment.clone(),
            Column::MinSalary => self.salary.and_then(|s| s.min).map(|v| v.to_string()),
            Column::MaxSalary => self.salary.and_then(|s| s.max).map(|v| v.to_string()),
            Column::Currency => self.salary.map(|s| s.currency.symbol().to_string()),
            Column::Brutto => self.salary.map(|s| s.brutto.to_string()),
            Column::Published => self.published.map(|d| d.format("%Y-%m-%d").to_string()),
            Column::Description => self.description.clone(),
        }
    }

    /// The record as a row in `Column::ALL` order, absent values empty
    pub fn to_row(&self) -> Vec<String> {
        Column::ALL
            .iter()
            .map(|column| self.value(*column).unwrap_or_default())
            .collect()
    }
}
