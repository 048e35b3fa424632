use actix_web::HttpResponse;

#[tracing::instrument(
    "Checking if api is online"
)]
pub async fn health_check() -> HttpResponse{
    HttpResponse::Ok().body("Working")
}

pub async fn index() -> HttpResponse{
    HttpResponse::Ok().body("API da Oficina Mecânica rodando com SQLite!")
}
