//! Controller de autenticação
//!
//! Registro e login de usuários. O hash de senha é bcrypt e o token emitido
//! é JWT com validade de 24 horas.

use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::PgPool;
use validator::Validate;

use crate::dto::auth_dto::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
use crate::models::user::normalize_email;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};
use crate::utils::validation::validate_password_strength;

pub struct AuthController {
    repository: UserRepository,
    jwt_config: JwtConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, jwt_config: JwtConfig) -> Self {
        Self {
            repository: UserRepository::new(pool),
            jwt_config,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AppError> {
        request.validate()?;

        validate_password_strength(&request.password).map_err(|_| {
            AppError::BadRequest(
                "A senha deve ter no mínimo 8 caracteres, com letra maiúscula, minúscula, número e caractere especial".to_string(),
            )
        })?;

        let email = normalize_email(&request.email);

        // Pré-checagem amigável; a corrida restante é resolvida pelo índice
        // único de email, que volta como 409
        if self.repository.email_exists(&email).await? {
            return Err(AppError::Conflict("Este email já está em uso".to_string()));
        }

        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("erro ao gerar hash da senha: {}", e)))?;

        let user = self
            .repository
            .create(request.name.trim(), &email, &password_hash)
            .await?;

        let token = generate_token(user.id, &self.jwt_config)?;

        Ok(AuthResponse {
            message: "Usuário registrado com sucesso".to_string(),
            token,
            user: UserResponse::from(user),
        })
    }

    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AppError> {
        let email = normalize_email(&request.email);

        // Email desconhecido e senha errada são indistinguíveis de propósito
        let user = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Email ou senha incorretos".to_string()))?;

        let valid = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("erro ao verificar senha: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized("Email ou senha incorretos".to_string()));
        }

        let token = generate_token(user.id, &self.jwt_config)?;

        Ok(AuthResponse {
            message: "Login realizado com sucesso".to_string(),
            token,
            user: UserResponse::from(user),
        })
    }
}
