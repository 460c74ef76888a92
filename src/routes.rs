use crate::store::{User, UserStore, UserView};
use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

/// Wires the five user endpoints. Each path is registered as its own
/// resource with a default service, so a request with the wrong method on a
/// known path gets 405 while unknown paths stay 404.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/user/create")
            .route(web::post().to(create))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/user/get")
            .route(web::get().to(get))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/user/list")
            .route(web::get().to(list))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/user/update")
            .route(web::put().to(update))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/user/delete")
            .route(web::delete().to(delete))
            .default_service(web::route().to(method_not_allowed)),
    );
}

async fn method_not_allowed() -> impl Responder {
    HttpResponse::MethodNotAllowed().body("Method not allowed")
}

#[derive(Deserialize)]
struct IdQuery {
    // An absent parameter and an empty one are treated the same.
    #[serde(default)]
    id: String,
}

async fn create(store: web::Data<UserStore>, bytes: web::Bytes) -> impl Responder {
    let user: User = match serde_json::from_slice(&bytes) {
        Ok(user) => user,
        Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
    };

    tracing::info!("create {}", user.id);
    let view = UserView::from(user.clone());
    store.put(user);
    HttpResponse::Created().json(view)
}

async fn get(store: web::Data<UserStore>, query: web::Query<IdQuery>) -> impl Responder {
    let id = query.into_inner().id;
    if id.is_empty() {
        return HttpResponse::BadRequest().body("ID parameter is required");
    }

    tracing::info!("get {}", id);
    match store.get(&id) {
        Some(user) => HttpResponse::Ok().json(UserView::from(user)),
        None => HttpResponse::NotFound().body("User not found"),
    }
}

async fn list(store: web::Data<UserStore>) -> impl Responder {
    tracing::info!("list");
    let users: Vec<UserView> = store.list().into_iter().map(UserView::from).collect();
    HttpResponse::Ok().json(users)
}

async fn update(store: web::Data<UserStore>, bytes: web::Bytes) -> impl Responder {
    let user: User = match serde_json::from_slice(&bytes) {
        Ok(user) => user,
        Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
    };

    tracing::info!("update {}", user.id);
    let view = UserView::from(user.clone());
    if !store.update(user) {
        return HttpResponse::NotFound().body("User not found");
    }
    HttpResponse::Ok().json(view)
}

async fn delete(store: web::Data<UserStore>, query: web::Query<IdQuery>) -> impl Responder {
    let id = query.into_inner().id;
    if id.is_empty() {
        return HttpResponse::BadRequest().body("ID parameter is required");
    }

    tracing::info!("delete {}", id);
    if !store.delete(&id) {
        return HttpResponse::NotFound().body("User not found");
    }
    HttpResponse::NoContent().finish()
}
