/// Creates `From<String>`, `From<&'static str>` and `AsRef<str>` implementations for a newtype around
/// `Cow<'static, str>`, as well as `as_str` and a [`Display`][std::fmt::Display] implementation.
macro_rules! from_impl_for_string_and_str {
	($name:ident) => {
		impl From<String> for $name {
			fn from(value: String) -> Self {
				$name(std::borrow::Cow::Owned(value))
			}
		}

		impl From<&'static str> for $name {
			fn from(value: &'static str) -> Self {
				$name(std::borrow::Cow::Borrowed(value))
			}
		}

		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0.into_owned()
			}
		}

		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}

		impl $name {
			pub fn as_str(&self) -> &str {
				&self.0
			}
		}

		impl std::fmt::Display for $name {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				f.write_str(&self.0)
			}
		}
	}
}

/// Allows comparing the newtype with `str`, `&str` and `String` directly.
macro_rules! partial_eq_impl_for_str {
	($name:ident) => {
		impl PartialEq<str> for $name {
			fn eq(&self, other: &str) -> bool {
				self.0 == other
			}
		}

		impl<'a> PartialEq<&'a str> for $name {
			fn eq(&self, other: &&'a str) -> bool {
				self.0 == *other
			}
		}

		impl PartialEq<String> for $name {
			fn eq(&self, other: &String) -> bool {
				self.0 == other.as_str()
			}
		}
	}
}

/// Creates a `Debug` implementation listing the set flags, like `FieldAccess { public final }`,
/// and a [`FromStr`][std::str::FromStr] implementation taking the java modifiers separated by spaces.
macro_rules! access_flags {
	(
		$name:ident {
			$( $field:ident : $keyword:literal = $mask:literal ),* $(,)?
		}
	) => {
		impl std::fmt::Debug for $name {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				f.write_str(concat!(stringify!($name), " { "))?;
				$(
					if self.$field { f.write_str(concat!($keyword, " "))?; }
				)*
				f.write_str("}")
			}
		}

		impl From<u16> for $name {
			fn from(value: u16) -> Self {
				$name {
					$( $field: value & $mask != 0, )*
				}
			}
		}

		impl From<$name> for u16 {
			fn from(value: $name) -> Self {
				0 $( | (if value.$field { $mask } else { 0 }) )*
			}
		}

		impl std::str::FromStr for $name {
			type Err = anyhow::Error;

			fn from_str(s: &str) -> anyhow::Result<Self> {
				let mut access = $name::from(0u16);
				for keyword in s.split_whitespace() {
					match keyword {
						$( $keyword => access.$field = true, )*
						other => anyhow::bail!("unknown modifier {:?} for {}", other, stringify!($name)),
					}
				}
				Ok(access)
			}
		}

		impl TryFrom<String> for $name {
			type Error = anyhow::Error;

			fn try_from(value: String) -> anyhow::Result<Self> {
				value.parse()
			}
		}
	}
}

pub(crate) use from_impl_for_string_and_str;
pub(crate) use partial_eq_impl_for_str;
pub(crate) use access_flags;
