//! Qualification of relative references against an `xml:base`.
//!
//! A reference that already is an absolute IRI is kept as is. Anything
//! else is glued onto the relevant part of the base.
use iref::Iri;

/// Checks that `reference` is an absolute, well-formed IRI.
pub fn is_well_formed(reference: &str) -> bool {
	Iri::new(reference).is_ok()
}

/// Removes the fragment (the first `#` and everything after it) of a base URI.
pub fn strip_fragment(base: &str) -> &str {
	match base.find('#') {
		Some(i) => &base[..i],
		None => base,
	}
}

/// Components of a base URI used to rebuild absolute references.
struct BaseParts<'a> {
	scheme: &'a str,
	authority: &'a str,
	path: &'a str,
}

impl<'a> BaseParts<'a> {
	fn new(base: &'a str) -> Self {
		match Iri::new(base) {
			Ok(iri) => Self {
				scheme: iri.scheme().as_str(),
				authority: iri.authority().map(|a| a.as_str()).unwrap_or(""),
				path: iri.path().as_str(),
			},
			Err(_) => Self::split(base),
		}
	}

	/// Best effort decomposition of a base that is not a valid IRI.
	fn split(base: &'a str) -> Self {
		let (scheme, rest) = match base.find(':') {
			Some(i) => (&base[..i], &base[i + 1..]),
			None => ("", base),
		};

		match rest.strip_prefix("//") {
			Some(rest) => {
				let end = rest.find(['/', '\\', '?']).unwrap_or(rest.len());
				let path = &rest[end..];
				let path = &path[..path.find('?').unwrap_or(path.len())];
				Self {
					scheme,
					authority: &rest[..end],
					path,
				}
			}
			None => Self {
				scheme,
				authority: "",
				path: rest,
			},
		}
	}

	/// `<scheme>://<authority>`
	fn root(&self) -> String {
		format!("{}://{}", self.scheme, self.authority)
	}

	/// Path up to and including the last `/` or `\`.
	fn folder(&self) -> &'a str {
		match self.path.rfind(['/', '\\']) {
			Some(i) => &self.path[..=i],
			None if self.path.is_empty() => "/",
			None => "",
		}
	}
}

/// Resolves `reference` against `base`.
///
/// A `None` or empty reference designates the base itself.
pub fn resolve(reference: Option<&str>, base: &str) -> String {
	let reference = match reference {
		Some(r) if !r.is_empty() => r,
		_ => return base.to_string(),
	};

	if is_well_formed(reference) {
		return reference.to_string();
	}

	if reference.starts_with("//") || reference.starts_with("\\\\") {
		let parts = BaseParts::new(base);
		return format!("{}:{}", parts.scheme, reference);
	}

	if reference.starts_with('#') {
		return format!("{base}{reference}");
	}

	let parts = BaseParts::new(base);
	if reference.starts_with('/') || reference.starts_with('\\') {
		return format!("{}{}", parts.root(), reference);
	}

	if reference.starts_with("../") || reference.starts_with("..\\") {
		let joined = format!("{}{}", parts.folder(), reference);
		return format!("{}{}", parts.root(), collapse_parent_segments(joined));
	}

	format!("{}{}{}", parts.root(), parts.folder(), reference)
}

/// Repeatedly rewrites `/<segment>/../` into `/`.
fn collapse_parent_segments(mut path: String) -> String {
	loop {
		let found = path.match_indices(['/', '\\']).find_map(|(start, _)| {
			let rest = &path[start + 1..];
			let len = rest.find(['/', '\\'])?;
			let segment = &rest[..len];
			if !segment.is_empty() && segment != ".." && is_parent_step(&rest[len..]) {
				Some(start..start + len + 5)
			} else {
				None
			}
		});

		match found {
			Some(range) => path.replace_range(range, "/"),
			None => break path,
		}
	}
}

/// Checks that `s` starts with a `/../` step (either separator).
fn is_parent_step(s: &str) -> bool {
	let b = s.as_bytes();
	b.len() >= 4 && matches!(b[0], b'/' | b'\\') && &b[1..3] == b".." && matches!(b[3], b'/' | b'\\')
}

/// Derives the identifier of an `rdf:ID`-like value.
///
/// Well-formed IRIs are kept, values carrying a fragment are appended to the
/// base, other values become a fragment of the base.
pub fn qualify_id(value: &str, base: &str) -> String {
	if is_well_formed(value) {
		value.to_string()
	} else if value.contains('#') {
		format!("{base}{value}")
	} else {
		format!("{base}#{value}")
	}
}
