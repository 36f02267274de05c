use actix_web::web;

use crate::api::{employee, leave};

pub fn configure(cfg: &mut web::ServiceConfig, api_prefix: &str) {
    cfg.service(
        web::scope(api_prefix)
            .service(
                web::scope("/employees")
                    .service(web::resource("").route(web::post().to(employee::create_employee))),
            )
            .service(
                web::scope("/leave")
                    // /leave
                    .service(
                        web::resource("")
                            .route(web::post().to(leave::submit_leave))
                            .route(web::get().to(leave::list_leaves)),
                    )
                    // /leave/pending
                    .service(web::resource("/pending").route(web::get().to(leave::pending_leaves)))
                    // /leave/{id}/status
                    .service(
                        web::resource("/{id}/status")
                            .route(web::put().to(leave::transition_leave)),
                    ),
            ),
    );
}
