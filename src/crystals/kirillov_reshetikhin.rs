//! # Kirillov-Reshetikhin 晶体 `B^{1,1}`
//!
//! 在经典字母晶体上加入 `0` 箭头得到的有限仿射晶体：
//! - `A_n^(1)`: `f_0(n+1) = 1`
//! - `C_n^(1)`: `f_0(-1) = 1`
//!
//! ## 依赖关系
//! - 复用 `crystals/letters.rs` 的经典算子
//! - 实现 `crystal::Crystal`

use crate::crystal::{Cardinality, Crystal};
use crate::crystals::letters::{self, Letter};
use crate::error::{CrystalError, Result};
use crate::root_system::{CartanLetter, CartanType};

use std::fmt;

/// KR 晶体 `B^{1,1}`
#[derive(Debug, Clone)]
pub struct KirillovReshetikhin {
    cartan: CartanType,
    n: i32,
}

impl KirillovReshetikhin {
    pub fn new(cartan: CartanType) -> Result<Self> {
        if !cartan.is_affine() {
            return Err(CrystalError::InvalidInput(format!(
                "Kirillov-Reshetikhin crystals need an affine type, got {}",
                cartan
            )));
        }
        let n = letters::check_letter_type(&cartan)?;
        Ok(KirillovReshetikhin { cartan, n })
    }

    /// `f_0` 的起点与终点
    fn zero_arrow(&self) -> (Letter, Letter) {
        match self.cartan.letter() {
            CartanLetter::C => (Letter(-1), Letter(1)),
            _ => (Letter(self.n + 1), Letter(1)),
        }
    }
}

impl fmt::Display for KirillovReshetikhin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Kirillov-Reshetikhin crystal of type {} with (r,s)=(1,1)",
            self.cartan
        )
    }
}

impl Crystal for KirillovReshetikhin {
    type Element = Letter;

    fn cartan_type(&self) -> CartanType {
        self.cartan
    }

    fn module_generators(&self) -> Vec<Letter> {
        vec![Letter(1)]
    }

    fn cardinality(&self) -> Cardinality {
        Cardinality::Finite(letters::letter_count(self.cartan.letter(), self.n))
    }

    fn e(&self, b: &Letter, i: usize) -> Option<Letter> {
        if i == 0 {
            let (from, to) = self.zero_arrow();
            return (*b == to).then_some(from);
        }
        letters::classical_e(self.cartan.letter(), self.n, *b, i)
    }

    fn f(&self, b: &Letter, i: usize) -> Option<Letter> {
        if i == 0 {
            let (from, to) = self.zero_arrow();
            return (*b == from).then_some(to);
        }
        letters::classical_f(self.cartan.letter(), self.n, *b, i)
    }

    fn latex(&self, b: &Letter) -> String {
        b.latex()
    }

    fn list(&self) -> Result<Vec<Letter>> {
        Ok(letters::all_letters(self.cartan.letter(), self.n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::root_system::Weight;

    #[test]
    fn test_type_a_zero_arrow() {
        let k = KirillovReshetikhin::new("A2^(1)".parse().unwrap()).unwrap();
        assert_eq!(k.f(&Letter(3), 0), Some(Letter(1)));
        assert_eq!(k.e(&Letter(1), 0), Some(Letter(3)));
        assert_eq!(k.f(&Letter(1), 0), None);
        assert_eq!(k.epsilon(&Letter(1), 0), 1);
        assert_eq!(k.phi(&Letter(1), 0), 0);
        assert_eq!(k.e_string(&Letter(1), &[0, 2]), Some(Letter(2)));
        assert_eq!(k.e_string(&Letter(1), &[0, 0]), None);
    }

    #[test]
    fn test_type_c_zero_arrow() {
        let k = KirillovReshetikhin::new("C2^(1)".parse().unwrap()).unwrap();
        assert_eq!(k.f(&Letter(-1), 0), Some(Letter(1)));
        assert_eq!(k.e(&Letter(1), 0), Some(Letter(-1)));
        assert_eq!(k.cardinality(), Cardinality::Finite(4));
    }

    #[test]
    fn test_level_zero_weights() {
        let k = KirillovReshetikhin::new("A2^(1)".parse().unwrap()).unwrap();
        for b in k.list().unwrap() {
            assert_eq!(k.weight(&b).level(), 0);
        }
        assert_eq!(
            k.weight(&Letter(1)),
            Weight::from_coefficients([(0, -1), (1, 1)])
        );
    }

    #[test]
    fn test_display() {
        let k = KirillovReshetikhin::new("A2^(1)".parse().unwrap()).unwrap();
        assert_eq!(
            k.to_string(),
            "Kirillov-Reshetikhin crystal of type ['A', 2, 1] with (r,s)=(1,1)"
        );
    }

    #[test]
    fn test_requires_affine_type() {
        assert!(KirillovReshetikhin::new("A2".parse().unwrap()).is_err());
        assert!(KirillovReshetikhin::new("D4^(1)".parse().unwrap()).is_err());
        assert!(matches!(
            KirillovReshetikhin::new("A3000000000^(1)".parse().unwrap()),
            Err(CrystalError::InvalidCartanType(_))
        ));
    }
}
