use crate::domain::model::{Enquiry, OutboundEmail};

/// 組出通知信主旨，例如 `New Website enquiry – tenant – Jo`
pub fn subject(site_name: &str, enquiry: &Enquiry) -> String {
    format!(
        "New {} enquiry – {} – {}",
        site_name, enquiry.role, enquiry.name
    )
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

pub fn text_body(site_name: &str, enquiry: &Enquiry) -> String {
    format!(
        "New enquiry received via {site}\n\
         \n\
         Name: {name}\n\
         Email: {email}\n\
         Organisation: {organisation}\n\
         Role: {role}\n\
         Phone: {phone}\n\
         Source page: {source_page}\n\
         UTM source: {utm_source}\n\
         Received at: {received_at}\n\
         \n\
         Message:\n\
         {message}\n",
        site = site_name,
        name = enquiry.name,
        email = enquiry.email,
        organisation = or_dash(&enquiry.organisation),
        role = enquiry.role,
        phone = or_dash(&enquiry.phone),
        source_page = enquiry.source_page,
        utm_source = or_dash(&enquiry.utm_source),
        received_at = enquiry.received_at_iso(),
        message = enquiry.message,
    )
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// 先跳脫再把換行換成 `<br />`
fn html_multiline(s: &str) -> String {
    html_escape(s)
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\n', "<br />")
}

pub fn html_body(site_name: &str, enquiry: &Enquiry) -> String {
    let rows = [
        ("Name", enquiry.name.as_str()),
        ("Email", enquiry.email.as_str()),
        ("Organisation", or_dash(&enquiry.organisation)),
        ("Role", enquiry.role.as_str()),
        ("Phone", or_dash(&enquiry.phone)),
        ("Source page", enquiry.source_page.as_str()),
        ("UTM source", or_dash(&enquiry.utm_source)),
    ]
    .iter()
    .map(|(label, value)| {
        format!(
            "<tr><th align=\"left\">{}</th><td>{}</td></tr>",
            label,
            html_escape(value)
        )
    })
    .collect::<Vec<_>>()
    .join("\n");

    format!(
        "<h2>New enquiry received via {site}</h2>\n\
         <table>\n{rows}\n<tr><th align=\"left\">Received at</th><td>{received_at}</td></tr>\n</table>\n\
         <h3>Message</h3>\n\
         <p>{message}</p>\n",
        site = html_escape(site_name),
        rows = rows,
        received_at = enquiry.received_at_iso(),
        message = html_multiline(&enquiry.message),
    )
}

pub fn compose(site_name: &str, from: &str, to: &str, enquiry: &Enquiry) -> OutboundEmail {
    OutboundEmail {
        from: from.to_string(),
        to: to.to_string(),
        subject: subject(site_name, enquiry),
        text: text_body(site_name, enquiry),
        html: html_body(site_name, enquiry),
    }
}
