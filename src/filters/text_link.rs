use crate::utils::classify;

use std::future::Future;
use telers::Request;

/// Bot commands are handled by their own handlers only
pub fn text_is_not_command(request: &mut Request) -> impl Future<Output = bool> {
    let result = request.update.text().is_some_and(|text| !text.starts_with('/'));

    async move { result }
}

/// Passes if the text references a supported video, and puts the reference into the request extensions
pub fn text_contains_link(request: &mut Request) -> impl Future<Output = bool> {
    let link = request.update.text().and_then(classify);

    let result = if let Some(link) = link {
        request.extensions.insert(link);
        true
    } else {
        false
    };

    async move { result }
}
