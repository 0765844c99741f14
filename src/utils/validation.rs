//! Utilidades de validação
//!
//! Este módulo contém funções helper para validação de dados
//! de entrada dos formulários e da API.

use validator::ValidationError;

/// Valida o formato de placa de veículo já normalizada (maiúscula, sem
/// separadores): AAA9999 (padrão antigo) ou AAA9A99 (Mercosul).
pub fn validate_plate(value: &str) -> Result<(), ValidationError> {
    let plate: Vec<char> = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .collect();

    let ok = plate.len() == 7
        && plate[..3].iter().all(|c| c.is_ascii_uppercase())
        && plate[3].is_ascii_digit()
        && (plate[4].is_ascii_digit() || plate[4].is_ascii_uppercase())
        && plate[5..].iter().all(|c| c.is_ascii_digit());

    if !ok {
        let mut error = ValidationError::new("plate");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"AAA9999 ou AAA9A99".to_string());
        return Err(error);
    }
    Ok(())
}

/// Valida a força da senha: mínimo de 8 caracteres, com letra maiúscula,
/// minúscula, número e caractere especial.
pub fn validate_password_strength(value: &str) -> Result<(), ValidationError> {
    let long_enough = value.chars().count() >= 8;
    let has_uppercase = value.chars().any(|c| c.is_ascii_uppercase());
    let has_lowercase = value.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    let has_special = value.chars().any(|c| !c.is_alphanumeric());

    if !(long_enough && has_uppercase && has_lowercase && has_digit && has_special) {
        let error = ValidationError::new("password_strength");
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_plate_padrao_antigo() {
        assert!(validate_plate("ABC1234").is_ok());
        assert!(validate_plate("ABC-1234").is_ok());
    }

    #[test]
    fn test_validate_plate_mercosul() {
        assert!(validate_plate("ABC1D23").is_ok());
    }

    #[test]
    fn test_validate_plate_invalida() {
        assert!(validate_plate("abc1234").is_err());
        assert!(validate_plate("AB1234").is_err());
        assert!(validate_plate("ABCD123").is_err());
        assert!(validate_plate("").is_err());
    }

    #[test]
    fn test_validate_password_strength() {
        assert!(validate_password_strength("Segura@123").is_ok());
        assert!(validate_password_strength("curta@1A").is_ok());
        assert!(validate_password_strength("semarroba123A").is_err());
        assert!(validate_password_strength("Min@1").is_err());
        assert!(validate_password_strength("sem_maiuscula@1").is_err());
    }
}
