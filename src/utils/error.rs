use std::{fmt::Write as _, iter};

pub fn format_error_report(err: &(impl std::error::Error + ?Sized)) -> String {
    let mut output = String::new();
    let _ = write!(&mut output, "{err}");

    if let Some(cause) = err.source() {
        output.push_str(". Caused by:");
        for (i, err) in iter::successors(Some(cause), |err| err.source()).enumerate() {
            let _ = write!(&mut output, " {i}: {err}");
        }
    }

    output
}
