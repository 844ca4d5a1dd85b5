/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

const DATE_FORMAT: &str = "%Y%m%d";
const DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Formats a date as used in the credential scope, eg. `20150830`
pub(crate) fn format_date(date_time: &DateTime<Utc>) -> String {
    date_time.format(DATE_FORMAT).to_string()
}

/// Formats a timestamp as used in `x-amz-date`, eg. `20150830T123600Z`
pub(crate) fn format_date_time(date_time: &DateTime<Utc>) -> String {
    date_time.format(DATE_TIME_FORMAT).to_string()
}

#[allow(dead_code)] // only used by tests
pub(crate) fn parse_date_time(date_time_str: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let naive = NaiveDateTime::parse_from_str(date_time_str, DATE_TIME_FORMAT)?;
    Ok(Utc.from_utc_datetime(&naive))
}
