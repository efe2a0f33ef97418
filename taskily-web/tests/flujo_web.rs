//! Flujo completo contra una base real
//!
//! Estas pruebas necesitan un PostgreSQL accesible vía `DATABASE_URL`; sin la
//! variable se saltean en silencio para que la suite corra igual en entornos
//! sin base.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use taskily_shared::db::{
    migrations::run_migrations,
    pool::{create_pool, DatabaseConfig},
};
use taskily_web::{
    app::{build_router, AppState},
    config::{Config, HttpConfig, SmtpConfig},
    mail::Correo,
};

/// Arma la aplicación contra la base de `DATABASE_URL`, o `None` si no está
async fn app_de_prueba() -> Option<(Router, PgPool)> {
    let url = std::env::var("DATABASE_URL").ok()?;

    let pool = create_pool(DatabaseConfig {
        url: url.clone(),
        ..Default::default()
    })
    .await
    .expect("la base de prueba debe estar accesible");

    run_migrations(&pool).await.expect("las migraciones deben correr");

    let smtp = SmtpConfig {
        host: "localhost".to_string(),
        port: 1025,
        usuario: String::new(),
        password: String::new(),
        remitente: "Taskily <no-reply@taskily.local>".to_string(),
        base_url: "http://localhost:7000".to_string(),
    };
    let config = Config {
        http: HttpConfig {
            host: "127.0.0.1".to_string(),
            port: 7000,
        },
        database: taskily_web::config::DatabaseConfig {
            url,
            max_connections: 10,
        },
        smtp: smtp.clone(),
    };

    let correo = Correo::desde_config(&smtp).expect("config SMTP de prueba válida");
    let state = AppState::new(pool.clone(), config, correo);

    Some((build_router(state), pool))
}

fn post_form(uri: &str, cuerpo: String, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");

    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    builder.body(Body::from(cuerpo)).unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);

    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    builder.body(Body::empty()).unwrap()
}

async fn cuerpo_como_texto(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Registra un usuario nuevo y devuelve su cookie de sesión y su email
async fn registrar_e_iniciar(app: &Router) -> (String, String) {
    let email = format!("prueba-{}@ejemplo.com", Uuid::new_v4());

    let registro = app
        .clone()
        .oneshot(post_form(
            "/registrate",
            format!(
                "fullname=Usuario+de+Prueba&email={}&password=secreto123&confirmar=secreto123",
                email
            ),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(registro.status(), StatusCode::SEE_OTHER);
    assert_eq!(registro.headers()["location"], "/iniciar_sesion");

    let login = app
        .clone()
        .oneshot(post_form(
            "/iniciar_sesion",
            format!("email={}&password=secreto123", email),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(login.status(), StatusCode::SEE_OTHER);
    assert_eq!(login.headers()["location"], "/");

    let set_cookie = login.headers()[header::SET_COOKIE]
        .to_str()
        .unwrap()
        .to_string();
    let cookie = set_cookie.split(';').next().unwrap().to_string();
    assert!(cookie.starts_with("taskily_sesion="));

    (cookie, email)
}

#[tokio::test]
async fn test_sin_sesion_redirige_a_iniciar_sesion() {
    let Some((app, _pool)) = app_de_prueba().await else {
        return;
    };

    let response = app.oneshot(get("/", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/iniciar_sesion");
}

#[tokio::test]
async fn test_registro_con_passwords_distintos_no_crea_cuenta() {
    let Some((app, pool)) = app_de_prueba().await else {
        return;
    };

    let email = format!("prueba-{}@ejemplo.com", Uuid::new_v4());
    let response = app
        .oneshot(post_form(
            "/registrate",
            format!(
                "fullname=Alguien&email={}&password=secreto123&confirmar=otracosa",
                email
            ),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = cuerpo_como_texto(response).await;
    assert!(html.contains("Los passwords no coinciden."));

    let cuenta: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM usuarios WHERE email = LOWER($1)")
            .bind(&email)
            .fetch_optional(&pool)
            .await
            .unwrap();
    assert!(cuenta.is_none());
}

#[tokio::test]
async fn test_login_incorrecto_vuelve_al_formulario() {
    let Some((app, _pool)) = app_de_prueba().await else {
        return;
    };

    let (_cookie, email) = registrar_e_iniciar(&app).await;

    let response = app
        .oneshot(post_form(
            "/iniciar_sesion",
            format!("email={}&password=equivocado", email),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = cuerpo_como_texto(response).await;
    assert!(html.contains("Email o password incorrecto."));
}

#[tokio::test]
async fn test_validacion_de_proyecto_no_escribe_nada() {
    let Some((app, pool)) = app_de_prueba().await else {
        return;
    };

    let (cookie, email) = registrar_e_iniciar(&app).await;

    let response = app
        .clone()
        .oneshot(post_form(
            "/nuevo_proyecto",
            "nombre=&descripcion=".to_string(),
            Some(&cookie),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = cuerpo_como_texto(response).await;
    assert!(html.contains("El nombre del proyecto no puede ser vacío."));
    assert!(html.contains("Debes ingresar una breve descripción del proyecto."));

    let cantidad: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM proyectos p \
         JOIN usuarios u ON u.id = p.usuario_id WHERE u.email = LOWER($1)",
    )
    .bind(&email)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(cantidad.0, 0);
}

#[tokio::test]
async fn test_crear_proyecto_y_leerlo_por_slug() {
    let Some((app, pool)) = app_de_prueba().await else {
        return;
    };

    let (cookie, email) = registrar_e_iniciar(&app).await;

    let response = app
        .clone()
        .oneshot(post_form(
            "/nuevo_proyecto",
            "nombre=Proyecto+Demo&descripcion=Una+demo".to_string(),
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/");

    let (url,): (String,) = sqlx::query_as(
        "SELECT p.url FROM proyectos p \
         JOIN usuarios u ON u.id = p.usuario_id WHERE u.email = LOWER($1)",
    )
    .bind(&email)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert!(url.starts_with("proyecto-demo-"));

    let detalle = app
        .clone()
        .oneshot(get(&format!("/proyecto/{}", url), Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(detalle.status(), StatusCode::OK);
    let html = cuerpo_como_texto(detalle).await;
    assert!(html.contains("Proyecto Demo"));

    // La búsqueda por fragmento, sin distinguir mayúsculas, lo encuentra
    let busqueda = app
        .oneshot(post_form(
            "/buscar_proyectos",
            "search=demo".to_string(),
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(busqueda.status(), StatusCode::OK);
    let html = cuerpo_como_texto(busqueda).await;
    assert!(html.contains("Proyecto Demo"));
}

#[tokio::test]
async fn test_email_con_apostrofe_se_guarda_tal_cual_y_permite_login() {
    let Some((app, pool)) = app_de_prueba().await else {
        return;
    };

    // Una dirección válida puede llevar apóstrofo; debe guardarse sin
    // transformar para que el login la encuentre.
    let email = format!("o'brien-{}@ejemplo.com", Uuid::new_v4());

    let registro = app
        .clone()
        .oneshot(post_form(
            "/registrate",
            format!(
                "fullname=O+Brien&email={}&password=secreto123&confirmar=secreto123",
                email
            ),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(registro.status(), StatusCode::SEE_OTHER);
    assert_eq!(registro.headers()["location"], "/iniciar_sesion");

    let (guardado,): (String,) =
        sqlx::query_as("SELECT email FROM usuarios WHERE email = LOWER($1)")
            .bind(&email)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(guardado, email.to_lowercase());
    assert!(guardado.contains('\''));

    let login = app
        .oneshot(post_form(
            "/iniciar_sesion",
            format!("email={}&password=secreto123", email),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(login.status(), StatusCode::SEE_OTHER);
    assert_eq!(login.headers()["location"], "/");
}

#[tokio::test]
async fn test_actualizar_proyecto_valida_y_guarda() {
    let Some((app, pool)) = app_de_prueba().await else {
        return;
    };

    let (cookie, email) = registrar_e_iniciar(&app).await;
    app.clone()
        .oneshot(post_form(
            "/nuevo_proyecto",
            "nombre=Original&descripcion=Descripcion+original".to_string(),
            Some(&cookie),
        ))
        .await
        .unwrap();

    let (proyecto_id, url): (Uuid, String) = sqlx::query_as(
        "SELECT p.id, p.url FROM proyectos p \
         JOIN usuarios u ON u.id = p.usuario_id WHERE u.email = LOWER($1)",
    )
    .bind(&email)
    .fetch_one(&pool)
    .await
    .unwrap();

    // Campos vacíos: se vuelve a la vista de edición con los valores
    // guardados y no se escribe nada
    let invalido = app
        .clone()
        .oneshot(post_form(
            &format!("/actualizar_proyecto/{}", proyecto_id),
            "nombre=&descripcion=".to_string(),
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(invalido.status(), StatusCode::OK);
    let html = cuerpo_como_texto(invalido).await;
    assert!(html.contains("¡El nombre del proyecto no puede ser vacío!"));
    assert!(html.contains("¡La descripción del proyecto no puede ser vacía!"));
    assert!(html.contains("Original"));

    let (nombre,): (String,) = sqlx::query_as("SELECT nombre FROM proyectos WHERE id = $1")
        .bind(proyecto_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(nombre, "Original");

    // Valores válidos: se actualiza y el slug no cambia
    let valido = app
        .oneshot(post_form(
            &format!("/actualizar_proyecto/{}", proyecto_id),
            "nombre=Renombrado&descripcion=Otra+descripcion".to_string(),
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(valido.status(), StatusCode::SEE_OTHER);
    assert_eq!(valido.headers()["location"], "/");

    let (nombre, descripcion, url_actual): (String, String, String) =
        sqlx::query_as("SELECT nombre, descripcion, url FROM proyectos WHERE id = $1")
            .bind(proyecto_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(nombre, "Renombrado");
    assert_eq!(descripcion, "Otra descripcion");
    assert_eq!(url_actual, url);
}

#[tokio::test]
async fn test_proyecto_ajeno_redirige_al_home() {
    let Some((app, pool)) = app_de_prueba().await else {
        return;
    };

    let (cookie_dueno, email) = registrar_e_iniciar(&app).await;
    app.clone()
        .oneshot(post_form(
            "/nuevo_proyecto",
            "nombre=Privado&descripcion=Solo+del+dueño".to_string(),
            Some(&cookie_dueno),
        ))
        .await
        .unwrap();

    let (url,): (String,) = sqlx::query_as(
        "SELECT p.url FROM proyectos p \
         JOIN usuarios u ON u.id = p.usuario_id WHERE u.email = LOWER($1)",
    )
    .bind(&email)
    .fetch_one(&pool)
    .await
    .unwrap();

    let (cookie_otro, _) = registrar_e_iniciar(&app).await;

    for uri in [
        format!("/proyecto/{}", url),
        format!("/actualizar_proyecto/{}", url),
    ] {
        let response = app
            .clone()
            .oneshot(get(&uri, Some(&cookie_otro)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/");
    }
}

#[tokio::test]
async fn test_alternar_estado_de_tarea() {
    let Some((app, pool)) = app_de_prueba().await else {
        return;
    };

    let (cookie, email) = registrar_e_iniciar(&app).await;
    app.clone()
        .oneshot(post_form(
            "/nuevo_proyecto",
            "nombre=Con+Tareas&descripcion=Prueba".to_string(),
            Some(&cookie),
        ))
        .await
        .unwrap();

    let (url, proyecto_id): (String, Uuid) = sqlx::query_as(
        "SELECT p.url, p.id FROM proyectos p \
         JOIN usuarios u ON u.id = p.usuario_id WHERE u.email = LOWER($1)",
    )
    .bind(&email)
    .fetch_one(&pool)
    .await
    .unwrap();

    let alta = app
        .clone()
        .oneshot(post_form(
            &format!("/proyecto/{}", url),
            "definicion=Escribir+el+informe".to_string(),
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(alta.status(), StatusCode::SEE_OTHER);

    let (tarea_id, estado): (Uuid, bool) =
        sqlx::query_as("SELECT id, estado FROM tareas WHERE proyecto_id = $1")
            .bind(proyecto_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(!estado);

    let patch = app
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri(format!("/tarea/{}", tarea_id))
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(patch.status(), StatusCode::OK);

    let json = cuerpo_como_texto(patch).await;
    assert!(json.contains("\"estado\":true"));

    let (estado,): (bool,) = sqlx::query_as("SELECT estado FROM tareas WHERE id = $1")
        .bind(tarea_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(estado);
}

#[tokio::test]
async fn test_eliminar_proyecto_no_arrastra_sus_tareas() {
    let Some((app, pool)) = app_de_prueba().await else {
        return;
    };

    let (cookie, email) = registrar_e_iniciar(&app).await;
    app.clone()
        .oneshot(post_form(
            "/nuevo_proyecto",
            "nombre=Para+Borrar&descripcion=Prueba".to_string(),
            Some(&cookie),
        ))
        .await
        .unwrap();

    let (url, proyecto_id): (String, Uuid) = sqlx::query_as(
        "SELECT p.url, p.id FROM proyectos p \
         JOIN usuarios u ON u.id = p.usuario_id WHERE u.email = LOWER($1)",
    )
    .bind(&email)
    .fetch_one(&pool)
    .await
    .unwrap();

    app.clone()
        .oneshot(post_form(
            &format!("/proyecto/{}", url),
            "definicion=Tarea+huerfana".to_string(),
            Some(&cookie),
        ))
        .await
        .unwrap();

    let borrado = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/proyecto/{}", url))
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(borrado.status(), StatusCode::OK);
    let texto = cuerpo_como_texto(borrado).await;
    assert_eq!(texto, "Proyecto eliminado correctamente");

    let proyecto: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM proyectos WHERE id = $1")
        .bind(proyecto_id)
        .fetch_optional(&pool)
        .await
        .unwrap();
    assert!(proyecto.is_none());

    // Las tareas quedan en la tabla, sin proyecto que las alcance
    let (tareas,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tareas WHERE proyecto_id = $1")
        .bind(proyecto_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(tareas, 1);
}

#[tokio::test]
async fn test_cerrar_sesion_invalida_la_cookie() {
    let Some((app, _pool)) = app_de_prueba().await else {
        return;
    };

    let (cookie, _email) = registrar_e_iniciar(&app).await;

    let logout = app
        .clone()
        .oneshot(get("/cerrar_sesion", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(logout.status(), StatusCode::SEE_OTHER);
    assert_eq!(logout.headers()["location"], "/iniciar_sesion");

    // La sesión ya no existe en la base, la cookie vieja no sirve
    let home = app.oneshot(get("/", Some(&cookie))).await.unwrap();
    assert_eq!(home.status(), StatusCode::SEE_OTHER);
    assert_eq!(home.headers()["location"], "/iniciar_sesion");
}

#[tokio::test]
async fn test_token_de_restablecimiento_invalido_redirige() {
    let Some((app, _pool)) = app_de_prueba().await else {
        return;
    };

    let response = app
        .oneshot(get("/resetear_password/token-inexistente", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/restablecer_password");
}
