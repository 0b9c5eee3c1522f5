//! Request & response types for this service.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// The maximum length of a [`PlaceName`], in characters.
pub const MAX_PLACE_NAME_LENGTH: usize = 100;

/// A single footfall record.
///
/// Inbound payloads are validated by the deserializer, so a handler never
/// sees a malformed record. Rows read from the database go through the same
/// checks when their columns are decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct FootfallRecord
{
	/// The state the footfall was recorded in.
	pub state: PlaceName,

	/// The district the footfall was recorded in.
	pub district: PlaceName,
}

/// The name of a state or district.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, example = "Karnataka")]
pub struct PlaceName(String);

/// The reasons a [`PlaceName`] can be rejected.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum InvalidPlaceName
{
	/// The name was empty.
	#[error("place name may not be empty")]
	Empty,

	/// The name exceeded [`MAX_PLACE_NAME_LENGTH`] characters.
	#[error("place name may not exceed {MAX_PLACE_NAME_LENGTH} characters")]
	TooLong,
}

impl PlaceName
{
	/// Validate `value` against the length bounds.
	fn validate(value: &str) -> Result<(), InvalidPlaceName>
	{
		if value.is_empty() {
			return Err(InvalidPlaceName::Empty);
		}

		if value.chars().count() > MAX_PLACE_NAME_LENGTH {
			return Err(InvalidPlaceName::TooLong);
		}

		Ok(())
	}

	/// Create a new [`PlaceName`], validating the length bounds.
	pub fn new(value: String) -> Result<Self, InvalidPlaceName>
	{
		Self::validate(&value).map(|()| Self(value))
	}

	/// Returns the name as a string slice.
	pub fn as_str(&self) -> &str
	{
		&self.0
	}
}

impl fmt::Display for PlaceName
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.write_str(&self.0)
	}
}

impl FromStr for PlaceName
{
	type Err = InvalidPlaceName;

	fn from_str(value: &str) -> Result<Self, Self::Err>
	{
		Self::validate(value).map(|()| Self(value.to_owned()))
	}
}

impl<'de> Deserialize<'de> for PlaceName
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		/// Visitor that applies the length bounds.
		struct PlaceNameVisitor;

		impl de::Visitor<'_> for PlaceNameVisitor
		{
			type Value = PlaceName;

			fn expecting(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result
			{
				fmt.write_str("a state or district name")
			}

			fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
			where
				E: de::Error,
			{
				value.parse().map_err(E::custom)
			}

			fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
			where
				E: de::Error,
			{
				PlaceName::new(value).map_err(E::custom)
			}
		}

		deserializer.deserialize_string(PlaceNameVisitor)
	}
}

impl sqlx::Type<sqlx::MySql> for PlaceName
{
	fn type_info() -> <sqlx::MySql as sqlx::Database>::TypeInfo
	{
		<str as sqlx::Type<sqlx::MySql>>::type_info()
	}

	fn compatible(ty: &<sqlx::MySql as sqlx::Database>::TypeInfo) -> bool
	{
		<str as sqlx::Type<sqlx::MySql>>::compatible(ty)
	}
}

impl<'q> sqlx::Encode<'q, sqlx::MySql> for PlaceName
{
	fn encode_by_ref(
		&self,
		buf: &mut <sqlx::MySql as sqlx::Database>::ArgumentBuffer<'q>,
	) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError>
	{
		<String as sqlx::Encode<'q, sqlx::MySql>>::encode_by_ref(&self.0, buf)
	}
}

impl<'r> sqlx::Decode<'r, sqlx::MySql> for PlaceName
{
	fn decode(
		value: <sqlx::MySql as sqlx::Database>::ValueRef<'r>,
	) -> Result<Self, sqlx::error::BoxDynError>
	{
		let value = <String as sqlx::Decode<'r, sqlx::MySql>>::decode(value)?;

		Self::new(value).map_err(Into::into)
	}
}
