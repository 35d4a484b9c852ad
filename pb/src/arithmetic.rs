// Copyright 2021-2024 Andrew Conway.
// This file is part of ConcretePB.
// ConcretePB is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcretePB is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcretePB.  If not, see <https://www.gnu.org/licenses/>.


//! Exact rational arithmetic. Costs, scores and satisfactions are all [Numeric],
//! so sums never drift and equality tests (e.g. exactly at budget) mean what they say.

use num::{BigInt, BigRational, Signed, ToPrimitive, Zero};
use num::rational::Ratio;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::str::FromStr;
use crate::error::{PbError, Result};

/// All money, scores and utilities.
pub type Numeric = BigRational;

/// An integer as a [Numeric]
pub fn int(value:i64) -> Numeric { BigRational::from_integer(BigInt::from(value)) }

/// numerator/denominator. Panics if the denominator is zero.
pub fn frac(numerator:i64,denominator:i64) -> Numeric { BigRational::new(BigInt::from(numerator),BigInt::from(denominator)) }

/// A count (of voters, projects, ...) as a [Numeric]
pub fn count(n:usize) -> Numeric { BigRational::from_integer(BigInt::from(n)) }

/// Parse a number written as an integer ("12"), a fraction ("3/4") or a decimal ("1.09").
/// Decimals are converted exactly.
/// ```
/// use pb::arithmetic::{parse_numeric,frac};
/// assert_eq!(frac(109,100),parse_numeric("1.09").unwrap());
/// assert_eq!(frac(-3,4),parse_numeric("-3/4").unwrap());
/// assert_eq!(frac(7,1),parse_numeric(" 7 ").unwrap());
/// assert!(parse_numeric("seven").is_err());
/// ```
pub fn parse_numeric(s:&str) -> Result<Numeric> {
    let s = s.trim();
    let invalid = || PbError::InvalidNumber(s.to_string());
    if s.contains('/') { return Ratio::from_str(s).map_err(|_|invalid()); }
    let (negative,digits) = match s.strip_prefix('-') {
        Some(rest) => (true,rest),
        None => (false,s.strip_prefix('+').unwrap_or(s)),
    };
    let (int_part,frac_part) = digits.split_once('.').unwrap_or((digits,""));
    let all_digits = |part:&str| part.chars().all(|c|c.is_ascii_digit());
    if (int_part.is_empty() && frac_part.is_empty()) || !all_digits(int_part) || !all_digits(frac_part) { return Err(invalid()); }
    let numerator : BigInt = format!("{}{}",int_part,frac_part).parse().map_err(|_|invalid())?;
    let value = BigRational::new(numerator,num::pow(BigInt::from(10),frac_part.len()));
    Ok(if negative { -value } else { value })
}

/// Round up to the next multiple of granularity. A non-positive granularity leaves the value alone.
pub fn ceil_to_granularity(value:&Numeric,granularity:&Numeric) -> Numeric {
    if !granularity.is_positive() { return value.clone(); }
    (value/granularity).ceil()*granularity
}

/// How divisions and irrational functions are stored.
///
/// Exact mode keeps full rationals, whose denominators can grow large over long computations.
/// Approximate mode rounds each such result to the nearest f64 and keeps that value exactly,
/// which bounds denominator size at the cost of rounding error. Either way every stored value
/// is a [Numeric], so comparisons between stored values are exact and reproducible.
#[derive(Clone,Copy,Debug,Default,PartialEq,Eq,Hash,Serialize,Deserialize)]
pub enum ArithmeticMode {
    #[default]
    Exact,
    Approximate,
}

impl ArithmeticMode {
    /// numerator/denominator. Panics if the denominator is zero.
    pub fn div(self,numerator:&Numeric,denominator:&Numeric) -> Numeric { self.round(numerator/denominator) }

    pub fn round(self,value:Numeric) -> Numeric {
        match self {
            ArithmeticMode::Exact => value,
            ArithmeticMode::Approximate => approximate(&value),
        }
    }

    /// Square root. Exact when the argument is the square of a rational, otherwise via f64.
    /// Negative arguments give zero.
    /// ```
    /// use num::Signed;
    /// use pb::arithmetic::{ArithmeticMode,frac};
    /// assert_eq!(frac(3,2),ArithmeticMode::Exact.sqrt(&frac(9,4)));
    /// let root2 = ArithmeticMode::Exact.sqrt(&frac(2,1));
    /// assert!((root2.clone()*root2-frac(2,1)).abs()<frac(1,1000000));
    /// ```
    pub fn sqrt(self,value:&Numeric) -> Numeric {
        if !value.is_positive() { return Numeric::zero(); }
        let numer_root = value.numer().sqrt();
        let denom_root = value.denom().sqrt();
        if &(&numer_root*&numer_root)==value.numer() && &(&denom_root*&denom_root)==value.denom() {
            BigRational::new(numer_root,denom_root)
        } else {
            from_f64(to_f64(value).sqrt())
        }
    }

    /// ln(1+x). Exact at zero, otherwise via f64.
    pub fn ln_1p(self,value:&Numeric) -> Numeric {
        if value.is_zero() { Numeric::zero() } else { from_f64(to_f64(value).ln_1p()) }
    }
}

/// Nearest f64, for reporting. Not used for any decision.
pub fn to_f64(value:&Numeric) -> f64 { value.to_f64().unwrap_or(f64::NAN) }

fn from_f64(value:f64) -> Numeric { BigRational::from_float(value).unwrap_or_else(Numeric::zero) }

fn approximate(value:&Numeric) -> Numeric {
    value.to_f64().and_then(BigRational::from_float).unwrap_or_else(||value.clone())
}

/// The mean of values, each with a multiplicity. Zero if there are none.
pub fn mean<I:IntoIterator<Item=(Numeric,usize)>>(values:I) -> Numeric {
    let mut total = Numeric::zero();
    let mut n : usize = 0;
    for (value,multiplicity) in values {
        total+=value*count(multiplicity);
        n+=multiplicity;
    }
    if n==0 { Numeric::zero() } else { total/count(n) }
}

/// Gini coefficient of non-negative values, computed exactly. All zero gives zero.
/// ```
/// use pb::arithmetic::{gini_coefficient,int,frac};
/// assert_eq!(int(0),gini_coefficient(&[int(3),int(3),int(3)]).unwrap());
/// assert_eq!(frac(1,2),gini_coefficient(&[int(0),int(4)]).unwrap());
/// ```
pub fn gini_coefficient(values:&[Numeric]) -> Result<Numeric> {
    if let Some(negative) = values.iter().find(|v|v.is_negative()) { return Err(PbError::InvalidParameter(format!("Gini coefficient of negative value {}",negative))); }
    let sum : Numeric = values.iter().sum();
    if sum.is_zero() { return Ok(Numeric::zero()); }
    let n = values.len();
    let mut sorted = values.to_vec();
    sorted.sort();
    let weighted : Numeric = sorted.iter().enumerate().map(|(i,v)|v*count(n-i)).sum();
    Ok((count(n+1)-weighted*int(2)/sum)/count(n))
}

/// Serialize a [Numeric] as a string such as "3/2", for use with `#[serde(with=...)]`.
/// Deserialization also accepts decimals.
pub mod rational_string {
    use super::*;
    pub fn serialize<S:Serializer>(value:&Numeric,serializer:S) -> std::result::Result<S::Ok,S::Error> {
        serializer.serialize_str(&value.to_string())
    }
    pub fn deserialize<'de,D:Deserializer<'de>>(deserializer:D) -> std::result::Result<Numeric,D::Error> {
        let buf = String::deserialize(deserializer)?;
        parse_numeric(&buf).map_err(serde::de::Error::custom)
    }
}

/// Like [rational_string] for an optional value.
pub mod optional_rational_string {
    use super::*;
    pub fn serialize<S:Serializer>(value:&Option<Numeric>,serializer:S) -> std::result::Result<S::Ok,S::Error> {
        match value {
            Some(v) => serializer.serialize_some(&v.to_string()),
            None => serializer.serialize_none(),
        }
    }
    pub fn deserialize<'de,D:Deserializer<'de>>(deserializer:D) -> std::result::Result<Option<Numeric>,D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(buf) => parse_numeric(&buf).map(Some).map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

/// Like [rational_string] for the values of a map keyed by name.
pub mod rational_map_string {
    use super::*;
    pub fn serialize<S:Serializer>(values:&BTreeMap<String,Numeric>,serializer:S) -> std::result::Result<S::Ok,S::Error> {
        serializer.collect_map(values.iter().map(|(k,v)|(k,v.to_string())))
    }
    pub fn deserialize<'de,D:Deserializer<'de>>(deserializer:D) -> std::result::Result<BTreeMap<String,Numeric>,D::Error> {
        let raw = BTreeMap::<String,String>::deserialize(deserializer)?;
        raw.into_iter().map(|(k,v)|parse_numeric(&v).map(|v|(k,v))).collect::<Result<_>>().map_err(serde::de::Error::custom)
    }
}
