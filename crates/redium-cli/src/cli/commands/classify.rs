//! `redium classify <url>` – check whether a URL is a redirectable article.

use redium_core::pipeline::Redirector;
use redium_core::url_model::Classification;

pub fn run_classify(redirector: &Redirector, url: &str) {
    let result = redirector.classifier().classify_str(url);
    println!("{}", describe(&result));
}

pub(super) fn describe(result: &Classification) -> String {
    match result {
        Classification::Accepted(normalized) => format!("accepted {normalized}"),
        Classification::Rejected(reason) => format!("rejected: {reason}"),
    }
}
