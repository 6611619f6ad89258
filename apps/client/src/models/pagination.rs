/// 1-based page selection, translated to the backend's `skip`/`limit` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub per_page: u32,
}

impl Page {
    /// Page size the job listings use when the caller does not choose one.
    pub const JOBS_PER_PAGE: u32 = 20;
    /// Page size for application histories and applicant lists.
    pub const APPLICATIONS_PER_PAGE: u32 = 10;

    /// Page numbers below 1 are treated as the first page.
    pub fn new(number: u32, per_page: u32) -> Self {
        Self {
            number: number.max(1),
            per_page,
        }
    }

    pub fn first(per_page: u32) -> Self {
        Self::new(1, per_page)
    }

    pub fn skip(&self) -> u64 {
        u64::from(self.number - 1) * u64::from(self.per_page)
    }

    pub fn limit(&self) -> u32 {
        self.per_page
    }
}
