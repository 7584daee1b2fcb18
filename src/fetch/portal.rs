//! The two-request scrape protocol against the results portal.
//!
//! The portal is a stateful ASP.NET form page, not a REST endpoint: a GET
//! hands out session cookies plus anti-forgery tokens, and the actual query
//! is a POST replaying those tokens with the register number filled in.

use reqwest::Client;
use tracing::debug;
use url::Url;

use super::parse::{self, StudentPage, EVENTVALIDATION_FIELD, VIEWSTATE_FIELD};
use crate::error::ScrapeResult;

const RESULT_PAGE: &str = "http://www.srkrexams.in/Result.aspx";

const REGNO_FIELD: &str = "ctl00$ContentPlaceHolder1$txtRegNo";
const SUBMIT_FIELD: &str = "ctl00$ContentPlaceHolder1$btnSubmit";
const SUBMIT_VALUE: &str = "Submit";

/// Build the results-page URL for one exam.
pub fn result_url(exam_id: &str) -> ScrapeResult<Url> {
    Ok(Url::parse_with_params(RESULT_PAGE, &[("Id", exam_id)])?)
}

/// Fetch one student's results.
///
/// Both requests share a fresh cookie session that lives only for this call;
/// dropping the client on any exit path discards the cookies, so no session
/// state leaks between students.
pub async fn fetch_student(result_url: &Url, student_id: &str) -> ScrapeResult<StudentPage> {
    let client = Client::builder().cookie_store(true).build()?;

    let form_page = client
        .get(result_url.clone())
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    let tokens = parse::extract_tokens(&form_page)?;
    debug!(student = %student_id, "form tokens acquired");

    let form = [
        (VIEWSTATE_FIELD, tokens.view_state.as_str()),
        (EVENTVALIDATION_FIELD, tokens.event_validation.as_str()),
        (REGNO_FIELD, student_id),
        (SUBMIT_FIELD, SUBMIT_VALUE),
    ];
    let result_page = client
        .post(result_url.clone())
        .form(&form)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    Ok(parse::extract_student_page(&result_page))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_url_carries_the_exam_id() {
        let url = result_url("1457").unwrap();
        assert_eq!(url.as_str(), "http://www.srkrexams.in/Result.aspx?Id=1457");
    }

    #[test]
    fn exam_id_is_query_encoded() {
        let url = result_url("a b&c").unwrap();
        assert_eq!(url.query(), Some("Id=a+b%26c"));
    }
}
