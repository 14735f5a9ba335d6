// Copyright 2024 Andrew Conway.
// This file is part of ScottishSTV.
// ScottishSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ScottishSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ScottishSTV.  If not, see <https://www.gnu.org/licenses/>.

use serde::Serialize;
use serde::Deserialize;
use num::{One, BigRational, BigInt};
use crate::ballot_pile::BallotPaperCount;
use std::fmt::{Display, Formatter};
use std::convert::TryFrom;
use std::str::FromStr;
use num::rational::{ParseRatioError, Ratio};

/// The fraction applied to a ballot's weight when it is moved away from an
/// elected candidate. Exact rational arithmetic; never a float.
#[derive(Clone,Debug,Serialize,Deserialize,Ord, PartialOrd, Eq, PartialEq,Hash)]
#[serde(into = "String")]
#[serde(try_from = "String")]
pub struct TransferValue(pub(crate) num::rational::BigRational);

impl TransferValue {
    pub fn one() -> Self { TransferValue(num::rational::BigRational::one())}
    /// surplus/denominator, where the surplus may itself be fractional as the
    /// quota is a true-division quantity.
    pub fn from_surplus(surplus:BigRational,denominator:BallotPaperCount) -> Self {
        TransferValue(surplus/BigRational::from_integer(BigInt::from(denominator.0)))
    }

    /// the weight a ballot of weight `value` retains after transfer.
    pub fn mul(&self,value:&BigRational) -> BigRational {
        &self.0 * value
    }
}

pub fn convert_usize_to_rational(tally:usize) -> BigRational {
    BigRational::new(BigInt::from(tally),BigInt::one())
}

impl Display for TransferValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f,"{}",self.0)
    }
}

impl From<TransferValue> for String {
    fn from(t: TransferValue) -> Self { t.0.to_string() }
}

impl FromStr for TransferValue {
    type Err = ParseRatioError;
    fn from_str(s: &str) -> Result<Self, Self::Err> { Ok(TransferValue(Ratio::from_str(s)?)) }
}

impl TryFrom<String> for TransferValue {
    type Error = ParseRatioError;
    fn try_from(s: String) -> Result<Self, Self::Error> { Ok(TransferValue(Ratio::from_str(&s)?)) }
}

#[derive(Clone,Debug,Serialize,Deserialize,Ord, PartialOrd, Eq, PartialEq,Hash)]
#[serde(into = "String")]
#[serde(try_from = "String")]
/// A rational number that should be serialized/deserialized as a string. Equivalent to TransferValue in most ways, except without the TransferValue specific methods and name.
pub struct StringSerializedRational(pub num::rational::BigRational);

impl Display for StringSerializedRational {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f,"{}",self.0)
    }
}

impl From<StringSerializedRational> for String {
    fn from(t: StringSerializedRational) -> Self { t.0.to_string() }
}

impl FromStr for StringSerializedRational {
    type Err = ParseRatioError;
    fn from_str(s: &str) -> Result<Self, Self::Err> { Ok(StringSerializedRational(Ratio::from_str(s)?)) }
}

impl TryFrom<String> for StringSerializedRational {
    type Error = ParseRatioError;
    fn try_from(s: String) -> Result<Self, Self::Error> { Ok(StringSerializedRational(Ratio::from_str(&s)?)) }
}
