//! Named filter registry, mirroring how templates call the filters:
//! `value | sub_imgurl: "300x300", true`.

use std::fmt;
use std::str::FromStr;

use crate::error::FilterError;
use crate::rewriter::UrlRewriter;
use crate::sharding::HostSelection;

/// Filters exposed to templates, by their template name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    /// `to_baseurl`
    ToBaseurl,
    /// `to_absurl`
    ToAbsurl,
    /// `to_cdnurl`
    ToCdnurl,
    /// `sub_baseurl`
    SubBaseurl,
    /// `sub_absurl`
    SubAbsurl,
    /// `sub_imgurl`
    SubImgurl,
    /// `sanitize_str`
    SanitizeStr,
}

impl Filter {
    /// Every registered filter, in registration order.
    pub const ALL: [Filter; 7] = [
        Filter::ToBaseurl,
        Filter::ToAbsurl,
        Filter::ToCdnurl,
        Filter::SubBaseurl,
        Filter::SubAbsurl,
        Filter::SubImgurl,
        Filter::SanitizeStr,
    ];

    /// Name templates use to call the filter.
    pub fn name(self) -> &'static str {
        match self {
            Filter::ToBaseurl => "to_baseurl",
            Filter::ToAbsurl => "to_absurl",
            Filter::ToCdnurl => "to_cdnurl",
            Filter::SubBaseurl => "sub_baseurl",
            Filter::SubAbsurl => "sub_absurl",
            Filter::SubImgurl => "sub_imgurl",
            Filter::SanitizeStr => "sanitize_str",
        }
    }

    /// Maximum number of positional arguments after the input value.
    pub fn max_args(self) -> usize {
        match self {
            Filter::SubImgurl => 2,
            _ => 0,
        }
    }
}

impl FromStr for Filter {
    type Err = FilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Filter::ALL
            .into_iter()
            .find(|filter| filter.name() == value)
            .ok_or_else(|| FilterError::UnknownFilter(value.to_string()))
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<S: HostSelection> UrlRewriter<'_, S> {
    /// Run `filter` on `input` with positional template arguments.
    pub fn apply<A: AsRef<str>>(
        &self,
        filter: Filter,
        input: &str,
        args: &[A],
    ) -> Result<String, FilterError> {
        if args.len() > filter.max_args() {
            return Err(FilterError::InvalidArgument {
                filter: filter.name(),
                message: format!(
                    "expected at most {} argument(s), got {}",
                    filter.max_args(),
                    args.len()
                ),
            });
        }

        let output = match filter {
            Filter::ToBaseurl => self.to_baseurl(input),
            Filter::ToAbsurl => self.to_absurl(input),
            Filter::ToCdnurl => self.to_cdnurl(input)?,
            Filter::SubBaseurl => self.sub_baseurl(input),
            Filter::SubAbsurl => self.sub_absurl(input),
            Filter::SubImgurl => {
                let size = args.first().map(AsRef::as_ref);
                let hires = args.get(1).map(|arg| parse_hires(arg.as_ref())).transpose()?;
                self.sub_imgurl(input, size, hires.flatten())
            }
            Filter::SanitizeStr => self.sanitize_str(input),
        };
        Ok(output)
    }
}

fn parse_hires(value: &str) -> Result<Option<bool>, FilterError> {
    match value {
        "true" => Ok(Some(true)),
        "false" => Ok(Some(false)),
        "" | "nil" => Ok(None),
        other => Err(FilterError::InvalidArgument {
            filter: Filter::SubImgurl.name(),
            message: format!("hires must be `true` or `false`, got {other:?}"),
        }),
    }
}
