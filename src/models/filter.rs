//! Droplet address extraction and filter matching
//!
//! Every command narrows the inventory through [`FilterSet`]; there is no
//! other matching code in the crate.

use crate::client::Droplet;

/// Interface class tags we care about
const PUBLIC: &str = "public";
const PRIVATE: &str = "private";

/// Separator used when joining addresses into a single haystack
const ADDRESS_SEPARATOR: &str = ", ";

/// A droplet's addresses partitioned by interface class, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressView {
    pub public: Vec<String>,
    pub private: Vec<String>,
}

impl AddressView {
    /// First public address, the one ssh connects to
    pub fn first_public(&self) -> Option<&str> {
        self.public.first().map(String::as_str)
    }
}

/// Partition a droplet's interfaces into public and private addresses.
///
/// Interfaces tagged neither `public` nor `private` are dropped.
pub fn address_view(droplet: &Droplet) -> AddressView {
    let mut view = AddressView::default();

    for iface in &droplet.networks.v4 {
        match iface.kind.as_str() {
            PUBLIC => view.public.push(iface.ip_address.clone()),
            PRIVATE => view.private.push(iface.ip_address.clone()),
            _ => {}
        }
    }

    view
}

impl Droplet {
    /// See [`address_view`]
    pub fn addresses(&self) -> AddressView {
        address_view(self)
    }
}

/// Case-folded filter expressions. An empty set matches every droplet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    expressions: Vec<String>,
}

impl FilterSet {
    pub fn new<I, S>(expressions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            expressions: expressions
                .into_iter()
                .map(|e| e.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    /// True if any expression is a substring of the droplet's name, its
    /// joined public addresses, or its joined private addresses.
    ///
    /// Addresses are matched against the `", "`-joined list, so an
    /// expression may match across two adjacent addresses.
    pub fn matches(&self, droplet: &Droplet) -> bool {
        if self.expressions.is_empty() {
            return true;
        }

        let addresses = droplet.addresses();
        let haystacks = [
            droplet.name.to_lowercase(),
            addresses.public.join(ADDRESS_SEPARATOR).to_lowercase(),
            addresses.private.join(ADDRESS_SEPARATOR).to_lowercase(),
        ];

        self.expressions
            .iter()
            .any(|expr| haystacks.iter().any(|h| h.contains(expr.as_str())))
    }

    /// Droplets matching this filter, in inventory order
    pub fn apply<'a>(&self, droplets: &'a [Droplet]) -> Vec<&'a Droplet> {
        droplets.iter().filter(|d| self.matches(d)).collect()
    }
}

/// Free-function form of [`FilterSet::matches`]
#[cfg(test)]
pub fn matches<S: AsRef<str>>(droplet: &Droplet, filters: &[S]) -> bool {
    FilterSet::new(filters).matches(droplet)
}

/// First droplet whose full name equals `name`, ignoring case
pub fn find_by_exact_name<'a>(droplets: &'a [Droplet], name: &str) -> Option<&'a Droplet> {
    let wanted = name.to_lowercase();
    droplets.iter().find(|d| d.name.to_lowercase() == wanted)
}

/// Names containing `fragment` (case-insensitive), for shell completion
pub fn names_containing<'a>(droplets: &'a [Droplet], fragment: &str) -> Vec<&'a str> {
    let fragment = fragment.to_lowercase();
    droplets
        .iter()
        .filter(|d| d.name.to_lowercase().contains(&fragment))
        .map(|d| d.name.as_str())
        .collect()
}
